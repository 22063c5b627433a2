//! # Search Predicate
//!
//! A [`PropertySearch`] is the transient predicate behind the listing search
//! box: one user-supplied term, matched case-insensitively as a substring
//! against eight listing fields, combined with logical OR.
//!
//! The predicate is a struct of named per-field patterns rather than a bag
//! of field/value pairs, so the "same term copied across every field" shape
//! is visible in the type. It is never persisted.

use crate::model::Property;

/// Case-insensitive substring match against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern(String);

impl FieldPattern {
    fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Search predicate over listings: OR across name, description, amenities,
/// type and the four location fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySearch {
    pub name: FieldPattern,
    pub description: FieldPattern,
    pub amenities: FieldPattern,
    pub property_type: FieldPattern,
    pub street: FieldPattern,
    pub city: FieldPattern,
    pub state: FieldPattern,
    pub zipcode: FieldPattern,
}

impl PropertySearch {
    /// Build the predicate from one search term. Blank or whitespace-only
    /// terms produce no predicate; callers treat `None` as match-all.
    pub fn from_term(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            name: FieldPattern::new(term),
            description: FieldPattern::new(term),
            amenities: FieldPattern::new(term),
            property_type: FieldPattern::new(term),
            street: FieldPattern::new(term),
            city: FieldPattern::new(term),
            state: FieldPattern::new(term),
            zipcode: FieldPattern::new(term),
        })
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.name.matches(&property.name)
            || self.description.matches(&property.description)
            || property.amenities.iter().any(|a| self.amenities.matches(a))
            || self.property_type.matches(property.property_type.label())
            || self.street.matches(&property.location.street)
            || self.city.matches(&property.location.city)
            || self.state.matches(&property.location.state)
            || self.zipcode.matches(&property.location.zipcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::sample_property;
    use uuid::Uuid;

    #[test]
    fn blank_terms_build_no_predicate() {
        assert!(PropertySearch::from_term("").is_none());
        assert!(PropertySearch::from_term("   ").is_none());
        assert!(PropertySearch::from_term("\t\n").is_none());
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Sunny Garden Apartment");

        let query = PropertySearch::from_term("GARDEN").unwrap();
        assert!(query.matches(&property));

        let query = PropertySearch::from_term("garden ap").unwrap();
        assert!(query.matches(&property));

        let query = PropertySearch::from_term("penthouse").unwrap();
        assert!(!query.matches(&property));
    }

    #[test]
    fn any_of_the_eight_fields_can_match() {
        let owner = Uuid::new_v4();
        let mut property = sample_property(&owner, "Quiet Corner Flat");
        property.location.city = "Asheville".into();
        property.location.zipcode = "28801".into();
        property.amenities = vec!["Dishwasher".into(), "Free Parking".into()];

        for term in ["asheville", "28801", "parking", "apartment", "quiet corner"] {
            let query = PropertySearch::from_term(term).unwrap();
            assert!(query.matches(&property), "term {term:?} should match");
        }
    }

    #[test]
    fn term_is_trimmed_before_matching() {
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Harborview Loft");
        let query = PropertySearch::from_term("  harborview  ").unwrap();
        assert!(query.matches(&property));
    }
}
