use super::*;

fn bt(s: &str) -> BloodType {
    s.parse().unwrap()
}

#[test]
fn universal_donor_reaches_universal_recipient() {
    assert!(is_compatible(bt("O-"), bt("AB+")));
}

#[test]
fn universal_recipient_cannot_donate_to_o_negative() {
    assert!(!is_compatible(bt("AB+"), bt("O-")));
}

#[test]
fn matrix_is_not_symmetric() {
    let m = matrix();
    let asymmetric = (0..8).any(|r| (0..8).any(|d| m[r][d] != m[d][r]));
    assert!(asymmetric);
}

#[test]
fn every_type_can_receive_its_own_type() {
    for t in BloodType::ALL {
        assert!(is_compatible(t, t), "{t} should accept {t}");
    }
}

#[test]
fn o_negative_donates_to_all_and_ab_positive_receives_from_all() {
    for t in BloodType::ALL {
        assert!(is_compatible(BloodType::ONeg, t));
        assert!(is_compatible(t, BloodType::AbPos));
    }
}

#[test]
fn donate_to_agrees_with_receive_from() {
    for donor in BloodType::ALL {
        for recipient in BloodType::ALL {
            assert_eq!(
                donor.donate_to().contains(&recipient),
                recipient.receive_from().contains(&donor),
                "{donor} -> {recipient}"
            );
        }
    }
}

#[test]
fn compatible_pair_count_is_twenty_seven() {
    let count = matrix().iter().flatten().filter(|ok| **ok).count();
    assert_eq!(count, 27);
}

#[test]
fn parse_is_case_and_space_insensitive() {
    assert_eq!(bt("ab+"), BloodType::AbPos);
    assert_eq!(bt(" o - "), BloodType::ONeg);
    assert_eq!(bt("B+").to_string(), "B+");
}

#[test]
fn parse_rejects_unknown() {
    let err = "C+".parse::<BloodType>().unwrap_err();
    assert!(matches!(err, CalcError::UnknownBloodType(s) if s == "C+"));
}

#[test]
fn serde_uses_display_names() {
    assert_eq!(serde_json::to_string(&BloodType::AbNeg).unwrap(), "\"AB-\"");
    let parsed: BloodType = serde_json::from_str("\"O+\"").unwrap();
    assert_eq!(parsed, BloodType::OPos);
}
