//! Ready-made record types and sample input.

use crate::field::FieldSpec;
use crate::layout::{FlatRecord, RecordLayout};
use crate::options::ConditionSpec;

/// Fixed-length invoice line: `code` (3) then `amount` (6).
///
/// Blank lines and `#` comments are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleInvoice {
    pub code: String,
    pub amount: String,
}

impl FlatRecord for SampleInvoice {
    fn layout() -> RecordLayout<Self> {
        RecordLayout::fixed()
            .ignore_empty_spaces()
            .comment("#", true)
            .field(FieldSpec::new("code", |r: &mut Self, v| r.code = v).fixed(3))
            .field(FieldSpec::new("amount", |r: &mut Self, v| r.amount = v).fixed(6))
            .default_constructor()
    }
}

/// Delimited account line: `id;name;balance[;active]`.
///
/// The first line is a header, lines starting with `HDR` are excluded, and
/// `active` is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleAccount {
    pub id: u32,
    pub name: String,
    pub balance: f64,
    pub active: Option<bool>,
}

impl FlatRecord for SampleAccount {
    fn layout() -> RecordLayout<Self> {
        RecordLayout::delimited()
            .ignore_first(1)
            .ignore_empty_lines()
            .condition(ConditionSpec::ExcludeIfBegins("HDR".into()))
            .field(FieldSpec::new("id", |r: &mut Self, v| r.id = v).delimited(";"))
            .field(FieldSpec::new("name", |r: &mut Self, v| r.name = v).delimited(";"))
            .field(FieldSpec::new("balance", |r: &mut Self, v| r.balance = v).delimited(";"))
            .field(
                FieldSpec::new("active", |r: &mut Self, v| r.active = v)
                    .delimited(";")
                    .optional(),
            )
            .default_constructor()
    }
}

/// Input for [`SampleInvoice`], including lines that are skipped.
#[must_use]
pub fn sample_invoice_lines() -> Vec<String> {
    vec![
        "# invoices for March".to_string(),
        "A01001234".to_string(),
        String::new(),
        "B02000100".to_string(),
        "   ".to_string(),
        "  # end of batch".to_string(),
        "C03999999".to_string(),
    ]
}

/// The records [`sample_invoice_lines`] maps to.
#[must_use]
pub fn sample_invoices() -> Vec<SampleInvoice> {
    [("A01", "001234"), ("B02", "000100"), ("C03", "999999")]
        .into_iter()
        .map(|(code, amount)| SampleInvoice {
            code: code.to_string(),
            amount: amount.to_string(),
        })
        .collect()
}

/// Input for [`SampleAccount`], including a header and an excluded line.
#[must_use]
pub fn sample_account_lines() -> Vec<String> {
    vec![
        "id;name;balance;active".to_string(),
        "1;alice;10.5;yes".to_string(),
        "HDR;batch 7".to_string(),
        "2;bob;-3".to_string(),
        String::new(),
        "3;carol;0;n".to_string(),
    ]
}

/// The records [`sample_account_lines`] maps to.
#[must_use]
pub fn sample_accounts() -> Vec<SampleAccount> {
    vec![
        SampleAccount {
            id: 1,
            name: "alice".to_string(),
            balance: 10.5,
            active: Some(true),
        },
        SampleAccount {
            id: 2,
            name: "bob".to_string(),
            balance: -3.0,
            active: None,
        },
        SampleAccount {
            id: 3,
            name: "carol".to_string(),
            balance: 0.0,
            active: Some(false),
        },
    ]
}
