//! Location domain entity.

use crate::error::{DomainError, DomainResult};
use crate::validation::LOCATION_NAME;

/// A place users can be associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub(crate) id: Option<i64>,
    pub(crate) name: String,
    pub(crate) enabled: bool,
}

impl Location {
    /// Create an enabled location.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the name is empty.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        LOCATION_NAME.check("name", &name)?;
        Ok(Self {
            id: None,
            name,
            enabled: true,
        })
    }

    /// Record the id handed out by storage after the first save.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the location already has an id.
    pub fn assign_id(&mut self, id: i64) -> DomainResult<&mut Self> {
        if self.id.is_some() {
            return Err(DomainError::invalid("id", "already assigned"));
        }
        self.id = Some(id);
        Ok(self)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<&mut Self> {
        let name = name.into();
        LOCATION_NAME.check("name", &name)?;
        self.name = name;
        Ok(self)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn enable(&mut self) -> &mut Self {
        self.set_enabled(true)
    }

    pub fn disable(&mut self) -> &mut Self {
        self.set_enabled(false)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Alias for [`Location::enabled`]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
