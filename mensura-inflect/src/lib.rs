//! Mensura Inflect - singular/plural forms of unit names
//!
//! The formatter only needs one question answered: what is the plural of a
//! unit name? `Inflector` is that seam; `English` answers it for the catalog's
//! English names, including multi-word phrases like "meter per second".

mod english;

pub use english::English;

/// Turns a singular noun phrase into its plural form
///
/// Implementations never fail: anything they cannot inflect is returned as is.
pub trait Inflector: Send + Sync {
    /// Plural form of a singular noun phrase
    fn plural(&self, noun: &str) -> String;

    /// Singular when `count_is_one`, plural otherwise
    fn inflect(&self, noun: &str, count_is_one: bool) -> String {
        if count_is_one {
            noun.to_string()
        } else {
            self.plural(noun)
        }
    }
}
