//! Template identifier resolution
//!
//! Search order for an identifier:
//! 1. the identifier as an exact `category/name` path in the store;
//! 2. for bare identifiers only (no `/`), the same name inside each category in
//!    lexicographic category order, first match wins;
//! 3. otherwise [`ScaffoldError::TemplateNotFound`].
//!
//! Same-named templates in different categories are never merged; the category
//! that sorts first always wins for a bare identifier.

use super::store::TemplateStore;
use crate::error::{Result, ScaffoldError};
use tracing::debug;

/// A template body located in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTemplate<'s> {
    /// Category the body was found in
    pub category: &'s str,
    /// Name within the category
    pub name: &'s str,
    pub body: &'s str,
}

impl ResolvedTemplate<'_> {
    /// Fully qualified identifier, e.g. `shared/gitignore.tpl`
    pub fn qualified_id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

/// Maps template identifiers to bodies in a borrowed store
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'s> {
    store: &'s TemplateStore,
}

impl<'s> TemplateResolver<'s> {
    pub fn new(store: &'s TemplateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'s TemplateStore {
        self.store
    }

    pub fn resolve(&self, id: &str) -> Result<ResolvedTemplate<'s>> {
        if let Some((category, name, body)) = self.store.get_path(id) {
            debug!(template = id, "resolved by exact path");
            return Ok(ResolvedTemplate {
                category,
                name,
                body,
            });
        }

        if !id.contains('/') {
            for category in self.store.list_categories() {
                if let Some((category, name, body)) =
                    self.store.get_path(&format!("{}/{}", category, id))
                {
                    debug!(template = id, category, "resolved by category fallback");
                    return Ok(ResolvedTemplate {
                        category,
                        name,
                        body,
                    });
                }
            }
        }

        Err(ScaffoldError::TemplateNotFound(id.to_string()))
    }
}
