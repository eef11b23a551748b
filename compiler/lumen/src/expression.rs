//! A parsed, reusable expression.

use std::fmt;
use std::sync::Arc;

use futures_util::future::FutureExt;
use lumen_eval::{EvalError, EvalResult, Interpreter, OperatorRegistry, Pending, Scope, Value};
use lumen_ir::Expr;

/// The result of [`Engine::parse`](crate::Engine::parse).
///
/// Cloning is cheap, and one expression may be evaluated any number of
/// times, concurrently, against different receivers and environments.
#[derive(Clone, Debug)]
pub struct Expression {
    ast: Arc<Expr>,
    registry: Arc<OperatorRegistry>,
}

impl Expression {
    pub(crate) fn new(ast: Expr, registry: Arc<OperatorRegistry>) -> Self {
        Expression {
            ast: Arc::new(ast),
            registry,
        }
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// Evaluate with `receiver` as `this` and names resolved in
    /// `environment`.
    ///
    /// When nothing along the way was pending the value is returned as is.
    /// Otherwise the evaluation is suspended and handed back as a
    /// [`Value::Pending`] that resolves to the final value.
    pub fn invoke(
        &self,
        receiver: impl Into<Value>,
        environment: impl Into<Value>,
    ) -> Result<Value, EvalError> {
        let mut future = self.run(receiver.into(), environment.into()).boxed();
        match (&mut future).now_or_never() {
            Some(result) => result,
            None => Ok(Value::Pending(Pending::new(future))),
        }
    }

    /// Evaluate to a fully resolved value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn evaluate(
        &self,
        receiver: impl Into<Value>,
        environment: impl Into<Value>,
    ) -> EvalResult {
        self.run(receiver.into(), environment.into()).await
    }

    fn run(
        &self,
        receiver: Value,
        environment: Value,
    ) -> impl std::future::Future<Output = EvalResult> + Send + 'static {
        let ast = Arc::clone(&self.ast);
        let scope = Scope::new(receiver, environment).with_registry(Arc::clone(&self.registry));
        async move { Interpreter::new(&scope).result(&ast).await }
    }
}

/// The canonical source form of the expression.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.ast, f)
    }
}
