//! Object-construction collaborator seam

use rig_node::{ExtRef, Mapping};
use rig_symbol::{ConstructError, Symbol};

/// Object-construction facility
///
/// Given a resolved type/callable and a final argument tree, invoke it and
/// return the built object. The engine delegates every construction — nested
/// and top-level — through this trait and never invokes constructors itself.
pub trait ObjectBuilder: Send + Sync {
    /// Construct an object from a symbol and its final argument tree
    ///
    /// # Errors
    /// Propagates the constructor's [`ConstructError`].
    fn construct(&self, symbol: &Symbol, args: Mapping) -> Result<ExtRef, ConstructError>;
}

/// Default builder: invokes the constructor registered with the symbol
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectBuilder;

impl ObjectBuilder for DirectBuilder {
    fn construct(&self, symbol: &Symbol, args: Mapping) -> Result<ExtRef, ConstructError> {
        symbol.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rig_symbol::SymbolPath;
    use std::str::FromStr;

    #[test]
    fn direct_builder_invokes_constructor() {
        let path = SymbolPath::from_str("pkg.Sum").unwrap();
        let symbol = Symbol::new_type(path, |args: Mapping| {
            let total: i64 = args
                .iter()
                .filter_map(|(_, v)| v.as_value().and_then(|v| v.as_int()))
                .sum();
            Ok(ExtRef::new("sum", total))
        });

        let mut args = Mapping::new();
        args.insert("a", 2i64);
        args.insert("b", 3i64);

        let built = DirectBuilder.construct(&symbol, args).unwrap();
        assert_eq!(built.downcast_ref::<i64>(), Some(&5));
    }

    #[test]
    fn direct_builder_propagates_failure() {
        let path = SymbolPath::from_str("pkg.Fails").unwrap();
        let symbol = Symbol::new_type(path, |_| Err(ConstructError::new("boom")));
        let err = DirectBuilder.construct(&symbol, Mapping::new()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
