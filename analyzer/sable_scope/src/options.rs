//! Analysis configuration.

use sable_traverse::EdgeTable;

/// Language feature level.
///
/// Governs which scope-introducing constructs exist, not strictness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FeatureLevel {
    /// No block-scoped binding kinds: block, switch, for, class, and
    /// class-field scopes are not opened, and lexical declarations degrade
    /// to the nearest variable scope.
    Legacy,
    /// Block scopes, lexical declarations, classes.
    Modern,
    /// Adds class field initializer and class static block scopes.
    #[default]
    Latest,
}

impl FeatureLevel {
    /// Whether block-scoped binding kinds exist at this level.
    #[inline]
    pub const fn has_block_scopes(self) -> bool {
        !matches!(self, FeatureLevel::Legacy)
    }

    /// Whether class field initializers and static blocks get their own
    /// variable scopes at this level.
    #[inline]
    pub const fn has_class_field_scopes(self) -> bool {
        matches!(self, FeatureLevel::Latest)
    }
}

/// What kind of source unit the program node represents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// A plain script: top-level `var` bindings live on the global scope.
    #[default]
    Script,
    /// A module: an implicitly strict module scope under the global scope
    /// hosts all top-level bindings, including imports.
    Module,
    /// Embedded code wrapped in a host function (CommonJS-style): a
    /// function-kind scope under the global scope hosts `var` bindings.
    Embedded,
}

/// How to treat `with` blocks and direct `eval` calls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DynamicScopePolicy {
    /// Flag every reference in affected scopes as tainted.
    #[default]
    Pessimistic,
    /// Trust static resolution; no taint is recorded.
    Optimistic,
}

/// Options accepted by [`analyze`](crate::analyze).
#[derive(Debug, Default, Clone)]
pub struct AnalyzeOptions {
    pub level: FeatureLevel,
    pub source: SourceKind,
    /// Treat the program top as strict even without a directive.
    pub implied_strict: bool,
    pub dynamic_scopes: DynamicScopePolicy,
    /// Materialize the implicit `arguments` binding in every ordinary
    /// function scope, referenced or not.
    pub always_arguments: bool,
    /// Child-edge configuration handed to the traversal engine.
    pub edges: EdgeTable,
}

impl AnalyzeOptions {
    #[inline]
    pub(crate) fn optimistic(&self) -> bool {
        self.dynamic_scopes == DynamicScopePolicy::Optimistic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_level_gates() {
        assert!(!FeatureLevel::Legacy.has_block_scopes());
        assert!(FeatureLevel::Modern.has_block_scopes());
        assert!(!FeatureLevel::Modern.has_class_field_scopes());
        assert!(FeatureLevel::Latest.has_class_field_scopes());
    }

    #[test]
    fn defaults() {
        let options = AnalyzeOptions::default();
        assert_eq!(options.level, FeatureLevel::Latest);
        assert_eq!(options.source, SourceKind::Script);
        assert!(!options.implied_strict);
        assert_eq!(options.dynamic_scopes, DynamicScopePolicy::Pessimistic);
        assert!(!options.always_arguments);
    }
}
