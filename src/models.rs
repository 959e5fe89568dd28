use serde::{Deserialize, Serialize};

/// Case-insensitive ordering key over (name, address).
///
/// Field order matters: the derived `Ord` compares the lowered name first and
/// falls back to the lowered address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameKey {
    name: String,
    address: String,
}

impl NameKey {
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            address: address.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Company {
    pub name: String,
    pub address: String,
    pub tax_id: String,
    pub income: u64,
    key: NameKey,
}

impl Company {
    pub fn new(name: &str, address: &str, tax_id: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            tax_id: tax_id.to_string(),
            income: 0,
            key: NameKey::new(name, address),
        }
    }

    pub fn name_key(&self) -> &NameKey {
        &self.key
    }
}

/// Selects a live company by either of its two keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyRef {
    TaxId(String),
    NameAddress { name: String, addr: String },
}

impl CompanyRef {
    pub fn tax_id(tax_id: impl Into<String>) -> Self {
        CompanyRef::TaxId(tax_id.into())
    }

    pub fn name_address(name: impl Into<String>, addr: impl Into<String>) -> Self {
        CompanyRef::NameAddress {
            name: name.into(),
            addr: addr.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    New,
    Cancel,
    Invoice,
    Audit,
    First,
    Next,
    Median,
}

/// One line of a command script.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRow {
    pub op: CommandType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addr: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub amount: Option<u32>,
}

impl CommandRow {
    /// Tax ID wins when present, otherwise the row addresses name + address.
    pub fn company_ref(&self) -> CompanyRef {
        if self.tax_id.is_empty() {
            CompanyRef::name_address(self.name.clone(), self.addr.clone())
        } else {
            CompanyRef::tax_id(self.tax_id.clone())
        }
    }
}

/// One row of the result report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub seq: usize,
    pub op: CommandType,
    pub ok: bool,
    pub name: Option<String>,
    pub addr: Option<String>,
    pub value: Option<u64>,
}

impl CommandOutput {
    pub fn status(seq: usize, op: CommandType, ok: bool) -> Self {
        Self {
            seq,
            op,
            ok,
            name: None,
            addr: None,
            value: None,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_company(mut self, name: String, addr: String) -> Self {
        self.name = Some(name);
        self.addr = Some(addr);
        self
    }
}
