//! Data models for feed quality processing
//!
//! This module contains the core data structures for representing catalog
//! feed records and the findings produced when rules are evaluated against
//! them.

use crate::constants::UNKNOWN_ID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Feed Fields
// =============================================================================

/// Attributes of a feed record that rules know how to inspect
///
/// Every checker names the fields it reads through this enum, so a finding's
/// `affected_field` is always one of these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedField {
    Id,
    Title,
    Description,
    Brand,
    Link,
    ImageLink,
    Availability,
    Price,
    Condition,
    Gtin,
    Mpn,
    GoogleProductCategory,
    ProductType,
    Gender,
    AgeGroup,
    Color,
    Size,
    ShippingWeight,
}

impl FeedField {
    /// All known fields in declaration order
    pub const ALL: &'static [FeedField] = &[
        FeedField::Id,
        FeedField::Title,
        FeedField::Description,
        FeedField::Brand,
        FeedField::Link,
        FeedField::ImageLink,
        FeedField::Availability,
        FeedField::Price,
        FeedField::Condition,
        FeedField::Gtin,
        FeedField::Mpn,
        FeedField::GoogleProductCategory,
        FeedField::ProductType,
        FeedField::Gender,
        FeedField::AgeGroup,
        FeedField::Color,
        FeedField::Size,
        FeedField::ShippingWeight,
    ];

    /// Canonical attribute name as used in Google Shopping feeds
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedField::Id => "id",
            FeedField::Title => "title",
            FeedField::Description => "description",
            FeedField::Brand => "brand",
            FeedField::Link => "link",
            FeedField::ImageLink => "image_link",
            FeedField::Availability => "availability",
            FeedField::Price => "price",
            FeedField::Condition => "condition",
            FeedField::Gtin => "gtin",
            FeedField::Mpn => "mpn",
            FeedField::GoogleProductCategory => "google_product_category",
            FeedField::ProductType => "product_type",
            FeedField::Gender => "gender",
            FeedField::AgeGroup => "age_group",
            FeedField::Color => "color",
            FeedField::Size => "size",
            FeedField::ShippingWeight => "shipping_weight",
        }
    }

    /// Human-readable label used in finding details (e.g. "Image link")
    pub fn label(&self) -> &'static str {
        match self {
            FeedField::Id => "ID",
            FeedField::Title => "Title",
            FeedField::Description => "Description",
            FeedField::Brand => "Brand",
            FeedField::Link => "Link",
            FeedField::ImageLink => "Image link",
            FeedField::Availability => "Availability",
            FeedField::Price => "Price",
            FeedField::Condition => "Condition",
            FeedField::Gtin => "GTIN",
            FeedField::Mpn => "MPN",
            FeedField::GoogleProductCategory => "Google product category",
            FeedField::ProductType => "Product type",
            FeedField::Gender => "Gender",
            FeedField::AgeGroup => "Age group",
            FeedField::Color => "Color",
            FeedField::Size => "Size",
            FeedField::ShippingWeight => "Shipping weight",
        }
    }

    /// Resolve a raw feed column name to a known field
    ///
    /// Accepts the `g:` namespace prefix, mixed case, and spaces or dashes in
    /// place of underscores ("Image Link", "g:image_link", "age-group").
    /// `color`/`colour` are treated as the same attribute.
    pub fn from_attribute_name(name: &str) -> Option<FeedField> {
        let normalized = normalize_attribute_name(name);
        let field = match normalized.as_str() {
            "id" => FeedField::Id,
            "title" => FeedField::Title,
            "description" => FeedField::Description,
            "brand" => FeedField::Brand,
            "link" => FeedField::Link,
            "image_link" => FeedField::ImageLink,
            "availability" => FeedField::Availability,
            "price" => FeedField::Price,
            "condition" => FeedField::Condition,
            "gtin" => FeedField::Gtin,
            "mpn" => FeedField::Mpn,
            "google_product_category" => FeedField::GoogleProductCategory,
            "product_type" => FeedField::ProductType,
            "gender" => FeedField::Gender,
            "age_group" => FeedField::AgeGroup,
            "color" | "colour" => FeedField::Color,
            "size" => FeedField::Size,
            "shipping_weight" => FeedField::ShippingWeight,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for FeedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a feed column header: trim, lowercase, drop `g:`, `-`/` ` → `_`
pub fn normalize_attribute_name(name: &str) -> String {
    let trimmed = name.trim().trim_start_matches('\u{feff}').to_lowercase();
    let without_namespace = trimmed.strip_prefix("g:").unwrap_or(&trimmed);
    without_namespace
        .split(|c: char| c == ' ' || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

// =============================================================================
// Feed Item
// =============================================================================

/// One catalog entry from a product feed
///
/// Known attributes are explicit optional members so rules stay statically
/// tied to the fields they inspect. Unrecognized columns are preserved in
/// `extra` but never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_weight: Option<String>,

    /// Attributes the engine does not recognize, keyed by normalized name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl FeedItem {
    /// Create an item with only an identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Build an item from raw `(column, value)` pairs
    ///
    /// Column names are resolved with [`FeedField::from_attribute_name`];
    /// anything unrecognized lands in `extra` under its normalized name.
    /// Later duplicates of the same column overwrite earlier ones.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut item = FeedItem::default();
        for (key, value) in attributes {
            let key = key.as_ref();
            match FeedField::from_attribute_name(key) {
                Some(field) => item.set(field, value),
                None => {
                    let name = normalize_attribute_name(key);
                    if !name.is_empty() {
                        item.extra.insert(name, value.into());
                    }
                }
            }
        }
        item
    }

    /// Builder-style setter
    pub fn with(mut self, field: FeedField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a known attribute
    pub fn set(&mut self, field: FeedField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Raw value of a known attribute, if present (may be blank)
    pub fn get(&self, field: FeedField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Trimmed value of a known attribute, `None` when absent or blank
    pub fn non_blank(&self, field: FeedField) -> Option<&str> {
        self.get(field)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Whether a known attribute is absent or whitespace-only
    pub fn is_blank(&self, field: FeedField) -> bool {
        self.non_blank(field).is_none()
    }

    /// Identifier used in findings: the trimmed `id`, or `UNKNOWN`
    pub fn display_id(&self) -> &str {
        self.non_blank(FeedField::Id).unwrap_or(UNKNOWN_ID)
    }

    /// Value of an unrecognized attribute
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extra
            .get(&normalize_attribute_name(name))
            .map(String::as_str)
    }

    fn slot(&self, field: FeedField) -> &Option<String> {
        match field {
            FeedField::Id => &self.id,
            FeedField::Title => &self.title,
            FeedField::Description => &self.description,
            FeedField::Brand => &self.brand,
            FeedField::Link => &self.link,
            FeedField::ImageLink => &self.image_link,
            FeedField::Availability => &self.availability,
            FeedField::Price => &self.price,
            FeedField::Condition => &self.condition,
            FeedField::Gtin => &self.gtin,
            FeedField::Mpn => &self.mpn,
            FeedField::GoogleProductCategory => &self.google_product_category,
            FeedField::ProductType => &self.product_type,
            FeedField::Gender => &self.gender,
            FeedField::AgeGroup => &self.age_group,
            FeedField::Color => &self.color,
            FeedField::Size => &self.size,
            FeedField::ShippingWeight => &self.shipping_weight,
        }
    }

    fn slot_mut(&mut self, field: FeedField) -> &mut Option<String> {
        match field {
            FeedField::Id => &mut self.id,
            FeedField::Title => &mut self.title,
            FeedField::Description => &mut self.description,
            FeedField::Brand => &mut self.brand,
            FeedField::Link => &mut self.link,
            FeedField::ImageLink => &mut self.image_link,
            FeedField::Availability => &mut self.availability,
            FeedField::Price => &mut self.price,
            FeedField::Condition => &mut self.condition,
            FeedField::Gtin => &mut self.gtin,
            FeedField::Mpn => &mut self.mpn,
            FeedField::GoogleProductCategory => &mut self.google_product_category,
            FeedField::ProductType => &mut self.product_type,
            FeedField::Gender => &mut self.gender,
            FeedField::AgeGroup => &mut self.age_group,
            FeedField::Color => &mut self.color,
            FeedField::Size => &mut self.size,
            FeedField::ShippingWeight => &mut self.shipping_weight,
        }
    }
}

// =============================================================================
// Findings
// =============================================================================

/// Closed vocabulary of finding types
///
/// The serialized form is the human-readable label, which is also the key
/// used in a report's per-type counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "Missing ID")]
    MissingId,
    #[serde(rename = "ID Too Long")]
    IdTooLong,
    #[serde(rename = "Gender Mismatch")]
    GenderMismatch,
    #[serde(rename = "Age Group Mismatch")]
    AgeGroupMismatch,
    #[serde(rename = "Missing Google Product Category")]
    MissingGoogleProductCategory,
    #[serde(rename = "Unspecific Google Product Category")]
    UnspecificGoogleProductCategory,
    #[serde(rename = "Missing Apparel Attributes")]
    MissingApparelAttributes,
    #[serde(rename = "Missing Product Type")]
    MissingProductType,
    #[serde(rename = "Missing Image Link")]
    MissingImageLink,
    #[serde(rename = "Missing Availability")]
    MissingAvailability,
    #[serde(rename = "Missing Price")]
    MissingPrice,
    #[serde(rename = "Invalid GTIN")]
    InvalidGtin,
    #[serde(rename = "Missing Space After Comma")]
    MissingSpaceAfterComma,
    #[serde(rename = "Repeated Dashes")]
    RepeatedDashes,
    #[serde(rename = "Special Characters")]
    SpecialCharacters,
    #[serde(rename = "Abbreviations")]
    Abbreviations,
    #[serde(rename = "Possible Misspelling")]
    PossibleMisspelling,
}

impl ErrorType {
    /// Human-readable label (identical to the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::MissingId => "Missing ID",
            ErrorType::IdTooLong => "ID Too Long",
            ErrorType::GenderMismatch => "Gender Mismatch",
            ErrorType::AgeGroupMismatch => "Age Group Mismatch",
            ErrorType::MissingGoogleProductCategory => "Missing Google Product Category",
            ErrorType::UnspecificGoogleProductCategory => "Unspecific Google Product Category",
            ErrorType::MissingApparelAttributes => "Missing Apparel Attributes",
            ErrorType::MissingProductType => "Missing Product Type",
            ErrorType::MissingImageLink => "Missing Image Link",
            ErrorType::MissingAvailability => "Missing Availability",
            ErrorType::MissingPrice => "Missing Price",
            ErrorType::InvalidGtin => "Invalid GTIN",
            ErrorType::MissingSpaceAfterComma => "Missing Space After Comma",
            ErrorType::RepeatedDashes => "Repeated Dashes",
            ErrorType::SpecialCharacters => "Special Characters",
            ErrorType::Abbreviations => "Abbreviations",
            ErrorType::PossibleMisspelling => "Possible Misspelling",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One data-quality finding for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    /// Identifier of the offending record, or `UNKNOWN`
    pub id: String,
    /// Finding type
    pub error_type: ErrorType,
    /// Human-readable explanation
    pub details: String,
    /// Attribute the rule inspected
    pub affected_field: FeedField,
    /// Raw or cleaned value that triggered the finding
    pub value: String,
}

impl ErrorResult {
    /// Create a finding for `item`, taking the identifier from the record
    pub fn new(
        item: &FeedItem,
        error_type: ErrorType,
        affected_field: FeedField,
        details: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: item.display_id().to_string(),
            error_type,
            details: details.into(),
            affected_field,
            value: value.into(),
        }
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.id, self.error_type, self.affected_field, self.details
        )
    }
}
