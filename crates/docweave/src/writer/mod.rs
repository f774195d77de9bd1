//! Writer implementations for different output formats

#[cfg(feature = "docx")]
mod docx;
mod json;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

use crate::det::Element;
use crate::fetch::ResourceFetcher;
use crate::style::StyleMapper;
use crate::{ConvertOptions, Error, Result};

#[cfg(feature = "docx")]
pub use self::docx::DocxWriter;
pub use json::JsonWriter;

/// What a writer may use besides the DET itself.
#[derive(Clone, Copy)]
pub struct WriteEnv<'a> {
    /// The style mapper.
    pub mapper: &'a StyleMapper,
    /// The fetcher for remote resources.
    pub fetcher: &'a dyn ResourceFetcher,
    /// Conversion options.
    pub options: &'a ConvertOptions,
}

/// Serializes DET elements into an output format.
pub trait FormatWriter: Send + Sync {
    /// Writes the elements to bytes.
    fn write(&self, elements: &[Element], env: &WriteEnv<'_>) -> Result<Vec<u8>>;
}

/// Maps lower-cased format names to writers.
#[derive(Clone)]
pub struct FormatRegistry {
    writers: HashMap<EcoString, Arc<dyn FormatWriter>>,
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

impl Default for FormatRegistry {
    /// A registry with the built-in formats: `json` and, with the `docx`
    /// feature, `docx`.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("json", JsonWriter);
        #[cfg(feature = "docx")]
        registry.register("docx", DocxWriter);
        registry
    }
}

impl FormatRegistry {
    /// Creates a registry without any format.
    pub fn empty() -> Self {
        Self {
            writers: HashMap::new(),
        }
    }

    /// Registers a writer; a later registration under the same name
    /// replaces an earlier one.
    pub fn register(&mut self, name: &str, writer: impl FormatWriter + 'static) {
        self.writers
            .insert(name.to_ascii_lowercase().into(), Arc::new(writer));
    }

    /// Looks up a writer.
    pub fn get(&self, name: &str) -> Option<&dyn FormatWriter> {
        self.writers
            .get(name.to_ascii_lowercase().as_str())
            .map(|writer| writer.as_ref())
    }

    /// Looks up a writer, failing with a configuration error if none is
    /// registered under `name`.
    pub fn require(&self, name: &str) -> Result<&dyn FormatWriter> {
        self.get(name).ok_or_else(|| Error::unsupported_format(name))
    }

    /// The registered names in sorted order.
    pub fn formats(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.writers.keys().map(EcoString::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    struct Fixed(&'static [u8]);

    impl FormatWriter for Fixed {
        fn write(&self, _: &[Element], _: &WriteEnv<'_>) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut registry = FormatRegistry::empty();
        registry.register("Plain", Fixed(b"a"));
        assert!(registry.get("plain").is_some());
        assert!(registry.get("PLAIN").is_some());
    }

    #[test]
    fn unknown_format_is_a_configuration_error() {
        let registry = FormatRegistry::empty();
        let err = registry.require("pdf").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn builtin_formats() {
        let formats = FormatRegistry::default().formats().join(",");
        if cfg!(feature = "docx") {
            assert_eq!(formats, "docx,json");
        } else {
            assert_eq!(formats, "json");
        }
    }
}
