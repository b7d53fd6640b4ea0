use serde::Serialize;
use std::collections::BTreeSet;

/// Largest count rendered unless configured otherwise.
pub const DEFAULT_MAX_PAIRS: usize = 100;

/// CSS classes carried by every rendered select.
pub const SELECT_CLASSES: &[&str] = &["form-select", "form-control", "mb-2"];

/// The kind of business relationship a company has with the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Customer,
    Partnership,
    Investment,
    Competitor,
}

impl RelationshipType {
    /// Declaration order, which is also the rendered option order.
    pub const ALL: [RelationshipType; 4] = [
        RelationshipType::Customer,
        RelationshipType::Partnership,
        RelationshipType::Investment,
        RelationshipType::Competitor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Customer => "customer",
            RelationshipType::Partnership => "partnership",
            RelationshipType::Investment => "investment",
            RelationshipType::Competitor => "competitor",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Company,
    Type,
}

impl FieldKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            FieldKind::Company => "company",
            FieldKind::Type => "type",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    /// An option whose submitted value is its display text.
    pub fn same(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            text: label,
        }
    }
}

/// One `<select>` element of a field pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectField {
    pub kind: FieldKind,
    /// 1-based pair index.
    pub index: usize,
    /// Form name, `company-<index>` or `type-<index>`.
    pub name: String,
    pub classes: &'static [&'static str],
    pub options: Vec<SelectOption>,
}

impl SelectField {
    fn new(kind: FieldKind, index: usize, options: Vec<SelectOption>) -> Self {
        Self {
            kind,
            index,
            name: format!("{}-{}", kind.prefix(), index),
            classes: SELECT_CLASSES,
            options,
        }
    }

    /// Company select listing every name, in the order given.
    pub fn company<'a, I>(index: usize, names: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let options = names.into_iter().map(SelectOption::same).collect();
        Self::new(FieldKind::Company, index, options)
    }

    /// Relationship-type select with the fixed options.
    pub fn relationship(index: usize) -> Self {
        let options = RelationshipType::ALL
            .iter()
            .map(|t| SelectOption::same(t.as_str()))
            .collect();
        Self::new(FieldKind::Type, index, options)
    }
}

/// Build `count` field pairs, flattened in append order:
/// `company-1, type-1, company-2, type-2, ...`.
///
/// Callers bound `count`; see `FormPopulator::with_max_pairs`.
pub fn build_field_pairs(count: usize, names: &BTreeSet<String>) -> Vec<SelectField> {
    let mut fields = Vec::with_capacity(count.checked_mul(2).unwrap_or(0));
    for index in 1..=count {
        fields.push(SelectField::company(index, names));
        fields.push(SelectField::relationship(index));
    }
    fields
}
