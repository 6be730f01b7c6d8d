//! Display text and stable identifiers attached to enum variants
//!
//! Variants are described with strum attributes: the message is the
//! description, and the `identifier` and `additional_data` properties carry
//! the rest.
//!
//! ```
//! use alaveri_common::enums::EnumDescriptor;
//! use strum::{EnumIter, EnumMessage, EnumProperty};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumMessage, EnumProperty)]
//! enum Shipping {
//!     #[strum(message = "Standard post", props(identifier = "STD"))]
//!     Standard,
//!     #[strum(message = "Next day", props(identifier = "NXT", additional_data = "surcharge"))]
//!     Express,
//! }
//!
//! assert_eq!(Shipping::Express.description(), "Next day");
//! assert_eq!(Shipping::from_identifier("STD"), Some(Shipping::Standard));
//! ```

use strum::{EnumMessage, EnumProperty, IntoEnumIterator};

use crate::constants::enums::{ADDITIONAL_DATA, IDENTIFIER};

/// Metadata attached to one variant; absent parts are empty strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descriptor {
    pub description: &'static str,
    pub identifier: &'static str,
    pub additional_data: &'static str,
}

/// Descriptor lookups, implemented for every enum deriving
/// `EnumIter`, `EnumMessage` and `EnumProperty`
pub trait EnumDescriptor: IntoEnumIterator + EnumMessage + EnumProperty + Copy + PartialEq {
    /// `None` when the variant carries no message and neither property
    fn descriptor(&self) -> Option<Descriptor> {
        let description = self.get_message();
        let identifier = self.get_str(IDENTIFIER);
        let additional_data = self.get_str(ADDITIONAL_DATA);
        if description.is_none() && identifier.is_none() && additional_data.is_none() {
            return None;
        }
        Some(Descriptor {
            description: description.unwrap_or_default(),
            identifier: identifier.unwrap_or_default(),
            additional_data: additional_data.unwrap_or_default(),
        })
    }

    fn has_descriptor(&self) -> bool {
        self.descriptor().is_some()
    }

    fn description(&self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    fn identifier(&self) -> &'static str {
        self.get_str(IDENTIFIER).unwrap_or_default()
    }

    fn additional_data(&self) -> &'static str {
        self.get_str(ADDITIONAL_DATA).unwrap_or_default()
    }

    /// First variant, in declaration order, whose identifier matches exactly
    fn from_identifier(identifier: &str) -> Option<Self> {
        Self::iter().find(|variant| variant.get_str(IDENTIFIER) == Some(identifier))
    }

    /// Every variant with its identifier, in declaration order
    fn values_and_identifiers() -> Vec<(Self, Option<&'static str>)> {
        Self::iter().map(|variant| (variant, variant.get_str(IDENTIFIER))).collect()
    }
}

impl<T> EnumDescriptor for T where T: IntoEnumIterator + EnumMessage + EnumProperty + Copy + PartialEq {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumIter, EnumMessage, EnumProperty};

    #[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumMessage, EnumProperty)]
    enum Region {
        #[strum(message = "North America", props(identifier = "NA", additional_data = "USD"))]
        NorthAmerica,
        #[strum(message = "Europe", props(identifier = "EU"))]
        Europe,
        #[strum(props(identifier = "EU"))]
        EuropeanUnion,
        Unlisted,
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(
            Region::NorthAmerica.descriptor(),
            Some(Descriptor {
                description: "North America",
                identifier: "NA",
                additional_data: "USD",
            })
        );
        assert_eq!(
            Region::EuropeanUnion.descriptor(),
            Some(Descriptor {
                identifier: "EU",
                ..Descriptor::default()
            })
        );
        assert_eq!(Region::Unlisted.descriptor(), None);
    }

    #[test]
    fn test_has_descriptor() {
        assert!(Region::Europe.has_descriptor());
        assert!(!Region::Unlisted.has_descriptor());
    }

    #[test]
    fn test_parts_are_empty_when_absent() {
        assert_eq!(Region::NorthAmerica.description(), "North America");
        assert_eq!(Region::NorthAmerica.identifier(), "NA");
        assert_eq!(Region::NorthAmerica.additional_data(), "USD");

        assert_eq!(Region::Europe.additional_data(), "");
        assert_eq!(Region::EuropeanUnion.description(), "");
        assert_eq!(Region::Unlisted.description(), "");
        assert_eq!(Region::Unlisted.identifier(), "");
        assert_eq!(Region::Unlisted.additional_data(), "");
    }

    #[test]
    fn test_from_identifier() {
        assert_eq!(Region::from_identifier("NA"), Some(Region::NorthAmerica));
        // Duplicates resolve to the first declared variant
        assert_eq!(Region::from_identifier("EU"), Some(Region::Europe));
        assert_eq!(Region::from_identifier("eu"), None);
        assert_eq!(Region::from_identifier(""), None);
    }

    #[test]
    fn test_values_and_identifiers() {
        assert_eq!(
            Region::values_and_identifiers(),
            [
                (Region::NorthAmerica, Some("NA")),
                (Region::Europe, Some("EU")),
                (Region::EuropeanUnion, Some("EU")),
                (Region::Unlisted, None),
            ]
        );
    }
}
