//! Owners of receipt items and the two people splitting a receipt

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a receipt line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    PersonA,
    PersonB,
    /// Split between both people
    Shared,
    /// Not a purchasable item (header, subtotal, payment line...);
    /// excluded from settlement
    NotAnItem,
}

impl Owner {
    /// Whether items with this owner count towards settlement totals
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::NotAnItem)
    }
}

impl From<Person> for Owner {
    fn from(person: Person) -> Self {
        match person {
            Person::A => Owner::PersonA,
            Person::B => Owner::PersonB,
        }
    }
}

/// One of the two people splitting a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    A,
    B,
}

impl Person {
    /// The other person (the borrower when `self` paid)
    pub fn other(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Display name and command code for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub name: String,
    /// Single-letter command the operator types to pick this person
    pub code: String,
}

/// The two people sharing receipts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct People {
    pub a: PersonProfile,
    pub b: PersonProfile,
}

impl Default for People {
    fn default() -> Self {
        Self {
            a: PersonProfile {
                name: "Ana".to_string(),
                code: "a".to_string(),
            },
            b: PersonProfile {
                name: "Matheus".to_string(),
                code: "m".to_string(),
            },
        }
    }
}

impl People {
    pub fn profile(&self, person: Person) -> &PersonProfile {
        match person {
            Person::A => &self.a,
            Person::B => &self.b,
        }
    }

    pub fn name(&self, person: Person) -> &str {
        &self.profile(person).name
    }

    /// Command code as configured, without surrounding whitespace
    pub fn code(&self, person: Person) -> &str {
        self.profile(person).code.trim()
    }

    /// Human-readable label for an owner
    pub fn owner_label(&self, owner: Owner) -> String {
        match owner {
            Owner::PersonA => self.a.name.clone(),
            Owner::PersonB => self.b.name.clone(),
            Owner::Shared => "shared".to_string(),
            Owner::NotAnItem => "not an item".to_string(),
        }
    }

    /// Resolve a typed command code to a person, ignoring case
    pub fn person_for_code(&self, code: &str) -> Option<Person> {
        let code = code.trim().to_lowercase();
        [Person::A, Person::B]
            .into_iter()
            .find(|&person| self.code(person).to_lowercase() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_person() {
        assert_eq!(Person::A.other(), Person::B);
        assert_eq!(Person::B.other(), Person::A);
    }

    #[test]
    fn test_owner_from_person() {
        assert_eq!(Owner::from(Person::A), Owner::PersonA);
        assert_eq!(Owner::from(Person::B), Owner::PersonB);
    }

    #[test]
    fn test_not_an_item_is_not_settled() {
        assert!(Owner::Shared.is_settled());
        assert!(!Owner::NotAnItem.is_settled());
    }

    #[test]
    fn test_person_for_code() {
        let people = People::default();
        assert_eq!(people.person_for_code("a"), Some(Person::A));
        assert_eq!(people.person_for_code("m"), Some(Person::B));
        assert_eq!(people.person_for_code("x"), None);
    }

    #[test]
    fn test_padded_configured_code_still_matches() {
        let mut people = People::default();
        people.a.code = " A ".to_string();
        assert_eq!(people.code(Person::A), "A");
        assert_eq!(people.person_for_code("a"), Some(Person::A));
        assert_eq!(people.person_for_code(" a\n"), Some(Person::A));
    }

    #[test]
    fn test_owner_serialization() {
        let json = serde_json::to_string(&Owner::NotAnItem).unwrap();
        assert_eq!(json, "\"not_an_item\"");
    }
}
