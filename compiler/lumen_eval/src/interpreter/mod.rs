//! Tree-walking evaluation.
//!
//! Every node evaluates to a future of its fully resolved value: a pending
//! value read from the environment, from an object or returned by a host
//! function is awaited before anything else happens. The exceptions are
//! the two operands of a binary operator, which are joined concurrently.
//! Everything else runs strictly left to right, and `&&`, `||` and `?:`
//! never evaluate the operand they do not need.
//!
//! Each node's future is boxed and polled through [`GrowStack`], so deeply
//! nested expressions cannot overflow the polling thread's stack.

use std::sync::Arc;

use futures_util::future::{try_join, BoxFuture, FutureExt};
use lumen_ir::{Expr, Literal, LogicalOp, MemberKey, Property, PropertyKey};
use tracing::debug;

use crate::constant::decode;
use crate::convert::{to_boolean, to_property_key};
use crate::errors::{invalid_assignment_target, not_callable};
use crate::property::{get_property, set_property};
use crate::stack::GrowStack;
use crate::{evaluate_binary, evaluate_unary, EvalError, EvalResult, Object, OperatorRegistry, Value};

/// What an evaluation runs against: the value of `this`, the environment
/// that names resolve in, and the configured operators.
#[derive(Clone, Debug)]
pub struct Scope {
    receiver: Value,
    environment: Value,
    registry: Arc<OperatorRegistry>,
}

impl Scope {
    /// A scope with no configured operators.
    pub fn new(receiver: Value, environment: Value) -> Self {
        Scope {
            receiver,
            environment,
            registry: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<OperatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn environment(&self) -> &Value {
        &self.environment
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }
}

/// Evaluates expressions against one [`Scope`].
#[derive(Clone, Copy)]
pub struct Interpreter<'a> {
    scope: &'a Scope,
}

impl<'a> Interpreter<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Interpreter { scope }
    }

    /// The resolved value of `expr`.
    pub fn result(self, expr: &'a Expr) -> BoxFuture<'a, EvalResult> {
        GrowStack(self.eval(expr).boxed()).boxed()
    }

    /// Store `value` through the writable node `target`, returning the
    /// resolved value that was stored.
    pub fn write(self, target: &'a Expr, value: Value) -> BoxFuture<'a, EvalResult> {
        GrowStack(self.assign(target, value).boxed()).boxed()
    }

    async fn eval(self, expr: &'a Expr) -> EvalResult {
        match expr {
            Expr::Identifier(name) => get_property(&self.scope.environment, name)?.resolve().await,
            Expr::Receiver => self.scope.receiver.clone().resolve().await,
            Expr::Constant { kind, text } => Ok(decode(*kind, text)),
            Expr::Literal(literal) => Ok(literal_value(literal)),

            Expr::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.result(element).await?);
                }
                Ok(Value::from(values))
            }
            Expr::Object(properties) => {
                let object = Object::new();
                for property in properties {
                    let (key, value) = self.property(property).await?;
                    object.insert(key, value);
                }
                Ok(Value::Object(object))
            }

            Expr::Member { object, key } => {
                let (target, key) = self.member(object, key).await?;
                get_property(&target, &key)?.resolve().await
            }
            Expr::Call { callee, args } => self.call(callee, args).await,

            Expr::Assignment { target, value } => {
                let value = self.result(value).await?;
                self.write(target, value).await
            }
            Expr::Comma(items) => {
                let mut last = Value::Undefined;
                for item in items {
                    last = self.result(item).await?;
                }
                Ok(last)
            }
            Expr::Ternary {
                test,
                consequent,
                alternate,
            } => {
                if to_boolean(&self.result(test).await?) {
                    self.result(consequent).await
                } else {
                    self.result(alternate).await
                }
            }
            Expr::Logical { op, left, right } => {
                let left = self.result(left).await?;
                let decided = match op {
                    LogicalOp::And => !to_boolean(&left),
                    LogicalOp::Or => to_boolean(&left),
                };
                if decided {
                    Ok(left)
                } else {
                    self.result(right).await
                }
            }
            Expr::Equality { op, left, right }
            | Expr::Relational { op, left, right }
            | Expr::Additive { op, left, right }
            | Expr::Multiplicative { op, left, right } => {
                let (left, right) = try_join(self.result(left), self.result(right)).await?;
                evaluate_binary(&self.scope.registry, op, left, right)
            }
            Expr::Unary { op, operand } => {
                let operand = self.result(operand).await?;
                evaluate_unary(&self.scope.registry, op, operand)
            }
        }
    }

    async fn assign(self, target: &'a Expr, value: Value) -> EvalResult {
        let value = value.resolve().await?;
        match target {
            Expr::Identifier(name) => set_property(&self.scope.environment, name, value.clone())?,
            Expr::Member { object, key } => {
                let (target, key) = self.member(object, key).await?;
                set_property(&target, &key, value.clone())?;
            }
            other => return Err(invalid_assignment_target(other)),
        }
        Ok(value)
    }

    /// The resolved object of a member access and the key it names.
    async fn member(
        self,
        object: &'a Expr,
        key: &'a MemberKey,
    ) -> Result<(Value, Arc<str>), EvalError> {
        let target = self.result(object).await?;
        let key = match key {
            MemberKey::Static(name) => name.to_arc(),
            MemberKey::Computed(key) => to_property_key(&self.result(key).await?),
        };
        Ok((target, key))
    }

    /// A computed property evaluates its value before its key.
    async fn property(self, property: &'a Property) -> Result<(Arc<str>, Value), EvalError> {
        let value = self.result(&property.value).await?;
        let key = match &property.key {
            PropertyKey::Identifier(name) => name.to_arc(),
            PropertyKey::Constant { kind, text } => to_property_key(&decode(*kind, text)),
            PropertyKey::Computed(key) => to_property_key(&self.result(key).await?),
        };
        Ok((key, value))
    }

    /// A member callee is invoked with its object as receiver; any other
    /// callee with the scope's receiver.
    async fn call(self, callee: &'a Expr, args: &'a [Expr]) -> EvalResult {
        let (function, receiver) = match callee {
            Expr::Member { object, key } => {
                let (target, key) = self.member(object, key).await?;
                let function = get_property(&target, &key)?.resolve().await?;
                (function, target)
            }
            _ => {
                let function = self.result(callee).await?;
                let receiver = self.scope.receiver.clone().resolve().await?;
                (function, receiver)
            }
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.result(arg).await?);
        }

        let Value::Function(function) = function else {
            return Err(not_callable(callee, function.type_name()));
        };
        debug!(callee = %callee, args = values.len(), "call");
        function.call(receiver, values)?.resolve().await
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::True => Value::Bool(true),
        Literal::False => Value::Bool(false),
        Literal::Null => Value::Null,
        Literal::Undefined => Value::Undefined,
    }
}
