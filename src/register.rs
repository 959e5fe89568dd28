use crate::errors::RegisterError;
use crate::models::{Company, CompanyRef, NameKey};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use tracing::debug;

/// Stable handle of a company slot in the register arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompanyId(usize);

/// In-memory VAT register.
///
/// Companies live in one arena; `by_tax_id` and `by_name` are two ordered
/// indexes into it and always hold the same set of handles. The invoice
/// history only grows, also across cancellations.
#[derive(Debug, Default)]
pub struct VatRegister {
    slots: Vec<Option<Company>>,
    free: Vec<CompanyId>,
    by_tax_id: BTreeMap<String, CompanyId>,
    by_name: BTreeMap<NameKey, CompanyId>,
    invoices: Vec<u32>,
}

impl VatRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a company with zero income.
    ///
    /// Both uniqueness checks run before anything is touched, so a rejected
    /// insert leaves the register as it was.
    pub fn new_company(&mut self, name: &str, addr: &str, tax_id: &str) -> Result<(), RegisterError> {
        if self.by_tax_id.contains_key(tax_id) {
            return Err(RegisterError::DuplicateTaxId);
        }

        let company = Company::new(name, addr, tax_id);
        if self.by_name.contains_key(company.name_key()) {
            return Err(RegisterError::DuplicateNameAddress);
        }

        let key = company.name_key().clone();
        let id = self.allocate(company);
        self.by_tax_id.insert(tax_id.to_string(), id);
        self.by_name.insert(key, id);

        debug!(tax_id, name, addr, "company registered");
        Ok(())
    }

    pub fn cancel(&mut self, company: &CompanyRef) -> Result<(), RegisterError> {
        let id = self.find(company).ok_or(RegisterError::CompanyNotFound)?;
        let removed = self.slots[id.0]
            .take()
            .ok_or(RegisterError::CompanyNotFound)?;

        self.by_tax_id.remove(&removed.tax_id);
        self.by_name.remove(removed.name_key());
        self.free.push(id);

        debug!(tax_id = %removed.tax_id, name = %removed.name, "company cancelled");
        Ok(())
    }

    pub fn cancel_by_tax_id(&mut self, tax_id: &str) -> Result<(), RegisterError> {
        self.cancel(&CompanyRef::tax_id(tax_id))
    }

    pub fn cancel_by_name(&mut self, name: &str, addr: &str) -> Result<(), RegisterError> {
        self.cancel(&CompanyRef::name_address(name, addr))
    }

    /// Adds `amount` to the company's income and records it in the history.
    pub fn invoice(&mut self, company: &CompanyRef, amount: u32) -> Result<(), RegisterError> {
        let id = self.find(company).ok_or(RegisterError::CompanyNotFound)?;
        let entry = self.slots[id.0]
            .as_mut()
            .ok_or(RegisterError::CompanyNotFound)?;

        entry.income = entry.income.saturating_add(u64::from(amount));
        self.invoices.push(amount);

        debug!(tax_id = %entry.tax_id, amount, income = entry.income, "invoice recorded");
        Ok(())
    }

    pub fn invoice_by_tax_id(&mut self, tax_id: &str, amount: u32) -> Result<(), RegisterError> {
        self.invoice(&CompanyRef::tax_id(tax_id), amount)
    }

    pub fn invoice_by_name(&mut self, name: &str, addr: &str, amount: u32) -> Result<(), RegisterError> {
        self.invoice(&CompanyRef::name_address(name, addr), amount)
    }

    /// Sum of all invoices of a live company.
    pub fn audit(&self, company: &CompanyRef) -> Result<u64, RegisterError> {
        self.find(company)
            .and_then(|id| self.get(id))
            .map(|c| c.income)
            .ok_or(RegisterError::CompanyNotFound)
    }

    pub fn audit_by_tax_id(&self, tax_id: &str) -> Result<u64, RegisterError> {
        self.audit(&CompanyRef::tax_id(tax_id))
    }

    pub fn audit_by_name(&self, name: &str, addr: &str) -> Result<u64, RegisterError> {
        self.audit(&CompanyRef::name_address(name, addr))
    }

    /// Name and address of the first company in case-insensitive
    /// (name, address) order.
    pub fn first_company(&self) -> Option<(String, String)> {
        self.companies()
            .next()
            .map(|c| (c.name.clone(), c.address.clone()))
    }

    /// First company strictly after the given pair.
    ///
    /// The pair does not have to belong to a live company, so callers can keep
    /// iterating by feeding back the previous answer even if it was cancelled
    /// in between.
    pub fn next_company(&self, name: &str, addr: &str) -> Option<(String, String)> {
        let after = NameKey::new(name, addr);
        self.by_name
            .range((Excluded(after), Unbounded))
            .find_map(|(_, id)| self.get(*id))
            .map(|c| (c.name.clone(), c.address.clone()))
    }

    /// Median of every invoice ever recorded, cancelled companies included.
    ///
    /// Returns the element at sorted index `n / 2`, i.e. the upper of the two
    /// middle values when the count is even, and 0 for an empty history.
    pub fn median_invoice(&self) -> u32 {
        if self.invoices.is_empty() {
            return 0;
        }

        let mut scratch = self.invoices.clone();
        let mid = scratch.len() / 2;
        *scratch.select_nth_unstable(mid).1
    }

    /// Live companies in case-insensitive (name, address) order.
    pub fn companies(&self) -> impl Iterator<Item = &Company> + '_ {
        self.by_name.values().filter_map(move |id| self.get(*id))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn invoice_count(&self) -> usize {
        self.invoices.len()
    }

    fn find(&self, company: &CompanyRef) -> Option<CompanyId> {
        match company {
            CompanyRef::TaxId(tax_id) => self.by_tax_id.get(tax_id).copied(),
            CompanyRef::NameAddress { name, addr } => {
                self.by_name.get(&NameKey::new(name, addr)).copied()
            }
        }
    }

    fn get(&self, id: CompanyId) -> Option<&Company> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn allocate(&mut self, company: Company) -> CompanyId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(company);
                id
            }
            None => {
                self.slots.push(Some(company));
                CompanyId(self.slots.len() - 1)
            }
        }
    }
}
