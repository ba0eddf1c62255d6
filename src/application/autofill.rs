//! Address Auto-fill
//!
//! Binds CEP resolution to a form: watches a CEP input, debounces, resolves,
//! and writes the result into empty address fields.

use crate::application::address_resolver::AddressResolver;
use crate::domain::entities::ResolvedAddress;
use crate::domain::ports::{AddressForm, FormEvent};
use crate::domain::value_objects::{strip_non_digits, AddressField, CEP_LEN};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Input inactivity required before a lookup fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Notice shown to the user when a lookup fails.
pub const NOT_FOUND_NOTICE: &str = "CEP não encontrado ou inválido";

/// Errors raised while binding auto-fill to a form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutoFillError {
    #[error("CEP input não encontrado: {0}")]
    TargetNotFound(String),

    #[error("unknown address field: {0}")]
    UnknownField(String),

    #[error("no selector given for field {0}")]
    EmptySelector(AddressField),
}

/// Canonical field -> target selectors.
///
/// `default()` yields the storefront's standard field IDs. Use
/// [`FieldMappings::overlay`] to apply caller overrides on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappings {
    fields: BTreeMap<AddressField, Vec<String>>,
}

impl Default for FieldMappings {
    fn default() -> Self {
        Self::empty()
            .with(AddressField::Street, "#logradouro, #rua, #street")
            .with(AddressField::Neighborhood, "#bairro, #neighborhood")
            .with(AddressField::City, "#cidade, #city, #localidade")
            .with(AddressField::State, "#estado, #uf, #state")
            .with(AddressField::Complement, "#complemento, #complement")
    }
}

impl FieldMappings {
    pub fn empty() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Map `field` to a comma separated selector list.
    pub fn with(mut self, field: AddressField, selectors: &str) -> Self {
        self.fields.insert(field, split_selectors(selectors));
        self
    }

    /// Build overrides from `(field name, selectors)` pairs.
    ///
    /// Field names may be canonical (`street`) or the Portuguese form keys
    /// (`logradouro`).
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, AutoFillError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut mappings = Self::empty();
        for (name, selectors) in pairs {
            let field = AddressField::from_str(name)
                .ok_or_else(|| AutoFillError::UnknownField(name.to_string()))?;
            mappings = mappings.with(field, selectors);
        }
        Ok(mappings)
    }

    /// Defaults overlaid by `overrides`; an overridden field replaces the
    /// default selector list entirely.
    pub fn overlay(mut self, overrides: FieldMappings) -> Self {
        self.fields.extend(overrides.fields);
        self
    }

    pub fn validate(&self) -> Result<(), AutoFillError> {
        for (field, selectors) in &self.fields {
            if selectors.is_empty() || selectors.iter().any(|s| s.is_empty()) {
                return Err(AutoFillError::EmptySelector(*field));
            }
        }
        Ok(())
    }

    pub fn selectors(&self, field: AddressField) -> Option<&[String]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &[String])> {
        self.fields.iter().map(|(f, s)| (*f, s.as_slice()))
    }
}

fn split_selectors(selectors: &str) -> Vec<String> {
    selectors.split(',').map(|s| s.trim().to_string()).collect()
}

struct Inner {
    resolver: Arc<AddressResolver>,
    form: Arc<dyn AddressForm>,
    target: String,
    mappings: FieldMappings,
    debounce: Duration,
    /// Bumped on every input; a pending lookup fires only if still current
    generation: AtomicU64,
    /// Set while a lookup is in flight (input disabled)
    busy: AtomicBool,
}

/// Auto-fill binding for one CEP input.
///
/// Feed it every change of the input through [`AutoFill::on_input`].
pub struct AutoFill {
    inner: Arc<Inner>,
}

impl AutoFill {
    /// Bind to `target_selector` with the default debounce.
    pub fn bind(
        resolver: Arc<AddressResolver>,
        form: Arc<dyn AddressForm>,
        target_selector: &str,
        overrides: FieldMappings,
    ) -> Result<Self, AutoFillError> {
        Self::bind_with_debounce(resolver, form, target_selector, overrides, DEFAULT_DEBOUNCE)
    }

    pub fn bind_with_debounce(
        resolver: Arc<AddressResolver>,
        form: Arc<dyn AddressForm>,
        target_selector: &str,
        overrides: FieldMappings,
        debounce: Duration,
    ) -> Result<Self, AutoFillError> {
        if form.field_value(target_selector).is_none() {
            tracing::warn!("CEP input não encontrado: {}", target_selector);
            return Err(AutoFillError::TargetNotFound(target_selector.to_string()));
        }

        let mappings = FieldMappings::default().overlay(overrides);
        mappings.validate()?;

        Ok(Self {
            inner: Arc::new(Inner {
                resolver,
                form,
                target: target_selector.to_string(),
                mappings,
                debounce,
                generation: AtomicU64::new(0),
                busy: AtomicBool::new(false),
            }),
        })
    }

    pub fn mappings(&self) -> &FieldMappings {
        &self.inner.mappings
    }

    /// Handle a change of the CEP input.
    ///
    /// Any pending lookup is superseded. When the value holds exactly eight
    /// digits a new lookup is scheduled after the debounce window and its
    /// task handle is returned. Input arriving while a lookup is in flight
    /// is ignored, as the input is disabled at that point.
    pub fn on_input(&self, value: &str) -> Option<JoinHandle<()>> {
        if self.inner.busy.load(Ordering::SeqCst) {
            return None;
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let digits = strip_non_digits(value);
        if digits.len() != CEP_LEN {
            return None;
        }

        let inner = self.inner.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            inner.lookup(&digits).await;
        }))
    }

    /// Drop any pending (not yet started) lookup.
    pub fn cancel(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Inner {
    async fn lookup(&self, digits: &str) {
        let _busy = Busy::start(self);

        match self.resolver.resolve(digits, true).await {
            Ok(address) => {
                let filled = self.fill(&address);
                tracing::debug!("auto-fill: {} fields populated for cep {}", filled, digits);
            }
            Err(e) => {
                tracing::warn!("erro na consulta CEP: {}", e);
                self.form.show_error(NOT_FOUND_NOTICE);
            }
        }
    }

    /// Write address values into empty mapped fields. Returns how many
    /// elements were written.
    fn fill(&self, address: &ResolvedAddress) -> usize {
        let mut filled = 0;

        for (field, selectors) in self.mappings.iter() {
            let value = address.field(field);
            if value.is_empty() {
                continue;
            }

            for selector in selectors {
                // only untouched fields; never overwrite user input
                if self.form.field_value(selector).as_deref() != Some("") {
                    continue;
                }
                self.form.set_field_value(selector, value);
                self.form.emit(FormEvent::Input {
                    selector: selector.clone(),
                    value: value.to_string(),
                });
                self.form.emit(FormEvent::Change {
                    selector: selector.clone(),
                    value: value.to_string(),
                });
                filled += 1;
            }
        }

        filled
    }
}

/// Input disabled for the lifetime of a lookup; re-enabled on drop, which
/// also covers an aborted lookup task.
struct Busy<'a> {
    inner: &'a Inner,
}

impl<'a> Busy<'a> {
    fn start(inner: &'a Inner) -> Self {
        inner.busy.store(true, Ordering::SeqCst);
        inner.form.set_enabled(&inner.target, false);
        Self { inner }
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.inner.form.set_enabled(&self.inner.target, true);
        self.inner.busy.store(false, Ordering::SeqCst);
    }
}
