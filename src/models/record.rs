//! Contract record schema.
//!
//! A `Record` is the structured metadata extracted from one license or
//! contract document. The record keeps the document exactly as it was
//! decoded, including keys outside the known schema and values of an
//! unexpected type, so full-record search and JSON export see
//! everything the source contained.
//!
//! Typed access goes through total accessors. A field that is missing,
//! or whose value has the wrong JSON type, reads as `None`. List fields
//! yield their string elements and skip anything else.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One parsed contract/license document.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Always a JSON object.
    document: Value,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            document: Value::Object(Map::new()),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(document: Map<String, Value>) -> Self {
        Self {
            document: Value::Object(document),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Record::from)
    }
}

impl Record {
    /// The decoded document, unchanged.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Compact JSON text of the whole document.
    pub fn to_compact_json(&self) -> String {
        self.document.to_string()
    }

    /// JSON text of the whole document with 2-space indentation.
    pub fn to_pretty_json(&self) -> String {
        format!("{:#}", self.document)
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.document, |value, key| value.get(key))
    }

    fn text(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path)?.as_str()
    }

    fn list(&self, path: &[&str]) -> Option<Vec<&str>> {
        let items = self.lookup(path)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }
}

/// Total accessors for every leaf of the schema.
impl Record {
    pub fn licensor(&self) -> Option<&str> {
        self.text(&["parties", "licensor"])
    }

    pub fn licensee(&self) -> Option<&str> {
        self.text(&["parties", "licensee"])
    }

    pub fn effective_date(&self) -> Option<&str> {
        self.text(&["licensing_terms", "effective_date"])
    }

    pub fn term_duration(&self) -> Option<&str> {
        self.text(&["licensing_terms", "term_duration"])
    }

    pub fn scope_of_use(&self) -> Option<Vec<&str>> {
        self.list(&["licensing_terms", "scope_of_use"])
    }

    pub fn exclusivity(&self) -> Option<&str> {
        self.text(&["licensing_terms", "license_characteristics", "exclusivity"])
    }

    pub fn transferability(&self) -> Option<&str> {
        self.text(&["licensing_terms", "license_characteristics", "transferability"])
    }

    pub fn geographical_scope(&self) -> Option<&str> {
        self.text(&["licensing_terms", "license_characteristics", "geographical_scope"])
    }

    pub fn user_access(&self) -> Option<&str> {
        self.text(&["licensing_terms", "license_characteristics", "user_access"])
    }

    pub fn license_fee(&self) -> Option<&str> {
        self.text(&["financial_terms", "license_fee"])
    }

    pub fn royalty_terms(&self) -> Option<&str> {
        self.text(&["financial_terms", "royalty_terms"])
    }

    pub fn prohibited_uses(&self) -> Option<Vec<&str>> {
        self.list(&["usage_restrictions", "prohibited_uses"])
    }

    pub fn copyright_ownership(&self) -> Option<&str> {
        self.text(&["intellectual_property", "copyright_ownership"])
    }

    pub fn attribution_requirements(&self) -> Option<&str> {
        self.text(&["intellectual_property", "attribution_requirements"])
    }

    pub fn third_party_rights(&self) -> Option<&str> {
        self.text(&["legal_compliance", "third_party_rights"])
    }

    pub fn indemnification(&self) -> Option<&str> {
        self.text(&["legal_compliance", "indemnification"])
    }

    pub fn liability_limitations(&self) -> Option<&str> {
        self.text(&["legal_compliance", "liability_limitations"])
    }

    pub fn termination_grounds(&self) -> Option<Vec<&str>> {
        self.list(&["contract_termination", "termination_grounds"])
    }

    pub fn governing_law(&self) -> Option<&str> {
        self.text(&["contract_termination", "dispute_resolution", "governing_law"])
    }

    pub fn resolution_mechanism(&self) -> Option<&str> {
        self.text(&[
            "contract_termination",
            "dispute_resolution",
            "resolution_mechanism",
        ])
    }
}
