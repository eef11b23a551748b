//! [`Engine`] and its builder.
//!
//! An engine owns one compiled operator table and the implementations of
//! any configured operators. Parsing many sources with one engine reuses
//! the compiled table.

use std::sync::{Arc, OnceLock};

use lumen_eval::{EvalResult, OperatorRegistry, Value};
use lumen_lexer::{default_symbols, OperatorGroup, SymbolTable};
use lumen_lexer_core::classes::{is_digit, is_ident_start, is_quote};
use lumen_parse::{ParseError, Parser};
use tracing::debug;

use crate::{ConfigError, Expression};

/// Parses sources into [`Expression`]s with one operator configuration.
#[derive(Clone, Debug)]
pub struct Engine {
    symbols: Arc<SymbolTable>,
    registry: Arc<OperatorRegistry>,
}

impl Engine {
    /// An engine with the built-in operators.
    pub fn new() -> Self {
        Engine {
            symbols: Arc::new(default_symbols().clone()),
            registry: Arc::default(),
        }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Parse `source` into a reusable expression.
    pub fn parse(&self, source: &str) -> Result<Expression, ParseError> {
        let ast = Parser::with_symbols(source, &self.symbols).parse()?;
        Ok(Expression::new(ast, Arc::clone(&self.registry)))
    }

    /// The compiled operator table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide engine behind [`crate::parse`].
pub(crate) fn default_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::new)
}

/// Builder for an [`Engine`] with extra, replaced or removed operators.
///
/// Configuration changes which symbols each precedence group recognizes;
/// the shape of the grammar stays the same. The first invalid request is
/// reported by [`EngineBuilder::build`].
pub struct EngineBuilder {
    groups: Vec<(OperatorGroup, Vec<String>)>,
    registry: OperatorRegistry,
    error: Option<ConfigError>,
}

impl EngineBuilder {
    /// Start from the built-in operators.
    pub fn new() -> Self {
        let groups = OperatorGroup::ALL
            .iter()
            .map(|&group| {
                let symbols = group.default_symbols().iter().map(|&s| s.to_owned());
                (group, symbols.collect())
            })
            .collect();
        EngineBuilder {
            groups,
            registry: OperatorRegistry::new(),
            error: None,
        }
    }

    /// Add `symbol` to a binary precedence group, implemented by `f`.
    ///
    /// A built-in symbol keeps its precedence and gets `f` as its meaning.
    #[must_use]
    pub fn binary_operator(
        mut self,
        group: OperatorGroup,
        symbol: &str,
        f: impl Fn(Value, Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        if !group.accepts_custom() || group == OperatorGroup::Unary {
            self.fail(ConfigError::NotBinaryGroup {
                group,
                symbol: symbol.to_owned(),
            });
            return self;
        }
        if self.check_symbol(symbol) {
            self.add(group, symbol);
            self.registry.register_binary(symbol, f);
        }
        self
    }

    /// Add a prefix operator implemented by `f`.
    #[must_use]
    pub fn unary_operator(
        mut self,
        symbol: &str,
        f: impl Fn(Value) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        if self.check_symbol(symbol) {
            self.add(OperatorGroup::Unary, symbol);
            self.registry.register_unary(symbol, f);
        }
        self
    }

    /// Stop recognizing `symbol` in `group`.
    #[must_use]
    pub fn remove_operator(mut self, group: OperatorGroup, symbol: &str) -> Self {
        if let Some((_, symbols)) = self.groups.iter_mut().find(|(g, _)| *g == group) {
            symbols.retain(|s| s != symbol);
        }
        if group == OperatorGroup::Unary {
            self.registry.remove_unary(symbol);
        } else if group.accepts_custom() {
            self.registry.remove_binary(symbol);
        }
        self
    }

    /// Compile the operator table.
    pub fn build(self) -> Result<Engine, ConfigError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let symbols = SymbolTable::compile(
            self.groups
                .iter()
                .map(|(group, symbols)| (group.name(), symbols.iter())),
        );
        debug!(
            symbols = symbols.all().symbols().len(),
            configured = !self.registry.is_empty(),
            "engine built"
        );
        Ok(Engine {
            symbols: Arc::new(symbols),
            registry: Arc::new(self.registry),
        })
    }

    fn add(&mut self, group: OperatorGroup, symbol: &str) {
        if let Some((_, symbols)) = self.groups.iter_mut().find(|(g, _)| *g == group) {
            if !symbols.iter().any(|s| s == symbol) {
                symbols.push(symbol.to_owned());
            }
        }
    }

    /// Whether `symbol` can be lexed as an operator. Records an error if not.
    fn check_symbol(&mut self, symbol: &str) -> bool {
        let first = symbol.as_bytes().first().copied();
        let valid = first.is_some_and(|b| !is_ident_start(b) && !is_digit(b) && !is_quote(b))
            && !symbol.chars().any(char::is_whitespace)
            && !symbol.starts_with("//")
            && !symbol.starts_with("/*");
        if !valid {
            self.fail(ConfigError::InvalidSymbol {
                symbol: symbol.to_owned(),
            });
        }
        valid
    }

    fn fail(&mut self, error: ConfigError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
