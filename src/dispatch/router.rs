//! Call Router Module
//!
//! Resolves `(contract, method)` pairs to ledger operations, checks argument
//! shapes and wraps the outcome in a `Value`.
//!
//! # Result Conventions
//! - Fallible mutations return `ok <value>` or `err <code>`
//! - Lookups return `some <tuple>` or `none`, never an error
//! - Predicates and counters return the bare value
//!
//! Anything that prevents the call from reaching a registry is a
//! `DispatchError` instead.

use super::Value;
use crate::{error::DispatchError, state::Ledger, Principal};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const INGREDIENT_REGISTRY: &str = "ingredient-registry";
pub const PRODUCTION_BATCH: &str = "production-batch";
pub const QUALITY_TESTING: &str = "quality-testing";
pub const CERTIFICATION: &str = "certification";

/// One invocation of a ledger operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub contract: String,
    pub method: String,
    /// Acting principal; required by mutating methods only
    #[serde(default)]
    pub sender: Option<Principal>,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(contract: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            sender: None,
            args: Vec::new(),
        }
    }

    pub fn sender(mut self, sender: impl Into<Principal>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// Every operation reachable through dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    RegisterIngredient,
    GetIngredient,
    GetLastIngredientId,
    CreateBatch,
    AddBatchStep,
    UpdateBatchStatus,
    GetBatch,
    GetBatchStep,
    GetLastBatchId,
    GetLastStepId,
    RecordTest,
    GetTest,
    GetLastTestId,
    RegisterCertifier,
    SetCertifierActive,
    IssueCertification,
    IsCertified,
    GetCertifier,
    GetContractOwner,
}

impl Method {
    /// Look up a method on a contract
    pub fn resolve(contract: &str, method: &str) -> Result<Self, DispatchError> {
        let resolved = match contract {
            INGREDIENT_REGISTRY => match method {
                "register-ingredient" => Some(Method::RegisterIngredient),
                "get-ingredient" => Some(Method::GetIngredient),
                "get-last-id" => Some(Method::GetLastIngredientId),
                _ => None,
            },
            PRODUCTION_BATCH => match method {
                "create-batch" => Some(Method::CreateBatch),
                "add-batch-step" => Some(Method::AddBatchStep),
                "update-batch-status" => Some(Method::UpdateBatchStatus),
                "get-batch" => Some(Method::GetBatch),
                "get-batch-step" => Some(Method::GetBatchStep),
                "get-last-batch-id" => Some(Method::GetLastBatchId),
                "get-last-step-id" => Some(Method::GetLastStepId),
                _ => None,
            },
            QUALITY_TESTING => match method {
                "record-test" => Some(Method::RecordTest),
                "get-test" => Some(Method::GetTest),
                "get-last-test-id" => Some(Method::GetLastTestId),
                _ => None,
            },
            CERTIFICATION => match method {
                "register-certifier" => Some(Method::RegisterCertifier),
                "set-certifier-active" => Some(Method::SetCertifierActive),
                "issue-certification" => Some(Method::IssueCertification),
                "is-certified" => Some(Method::IsCertified),
                "get-certifier" => Some(Method::GetCertifier),
                "get-contract-owner" => Some(Method::GetContractOwner),
                _ => None,
            },
            _ => return Err(DispatchError::UnknownContract(contract.to_string())),
        };

        resolved.ok_or_else(|| DispatchError::UnknownMethod {
            contract: contract.to_string(),
            method: method.to_string(),
        })
    }

    /// Wire name of the method
    pub fn name(&self) -> &'static str {
        match self {
            Method::RegisterIngredient => "register-ingredient",
            Method::GetIngredient => "get-ingredient",
            Method::GetLastIngredientId => "get-last-id",
            Method::CreateBatch => "create-batch",
            Method::AddBatchStep => "add-batch-step",
            Method::UpdateBatchStatus => "update-batch-status",
            Method::GetBatch => "get-batch",
            Method::GetBatchStep => "get-batch-step",
            Method::GetLastBatchId => "get-last-batch-id",
            Method::GetLastStepId => "get-last-step-id",
            Method::RecordTest => "record-test",
            Method::GetTest => "get-test",
            Method::GetLastTestId => "get-last-test-id",
            Method::RegisterCertifier => "register-certifier",
            Method::SetCertifierActive => "set-certifier-active",
            Method::IssueCertification => "issue-certification",
            Method::IsCertified => "is-certified",
            Method::GetCertifier => "get-certifier",
            Method::GetContractOwner => "get-contract-owner",
        }
    }

    pub fn is_read_only(&self) -> bool {
        !matches!(
            self,
            Method::RegisterIngredient
                | Method::CreateBatch
                | Method::AddBatchStep
                | Method::UpdateBatchStatus
                | Method::RecordTest
                | Method::RegisterCertifier
                | Method::SetCertifierActive
                | Method::IssueCertification
        )
    }
}

/// Positional argument accessor with typed extraction
struct Args<'a> {
    method: Method,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(method: Method, values: &'a [Value], expected: usize) -> Result<Self, DispatchError> {
        if values.len() != expected {
            return Err(DispatchError::Arity {
                method: method.name().to_string(),
                expected,
                got: values.len(),
            });
        }
        Ok(Self { method, values })
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> DispatchError {
        DispatchError::ArgumentType {
            method: self.method.name().to_string(),
            index,
            expected,
        }
    }

    fn uint(&self, index: usize) -> Result<u64, DispatchError> {
        self.values[index]
            .as_uint()
            .ok_or_else(|| self.mismatch(index, "uint"))
    }

    fn boolean(&self, index: usize) -> Result<bool, DispatchError> {
        self.values[index]
            .as_bool()
            .ok_or_else(|| self.mismatch(index, "bool"))
    }

    fn string(&self, index: usize) -> Result<String, DispatchError> {
        self.values[index]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(index, "string-utf8"))
    }

    fn principal(&self, index: usize) -> Result<Principal, DispatchError> {
        self.values[index]
            .as_principal()
            .cloned()
            .ok_or_else(|| self.mismatch(index, "principal"))
    }

    fn uint_list(&self, index: usize) -> Result<Vec<u64>, DispatchError> {
        self.values[index]
            .as_list()
            .and_then(|items| items.iter().map(Value::as_uint).collect())
            .ok_or_else(|| self.mismatch(index, "list of uint"))
    }

    fn string_list(&self, index: usize) -> Result<Vec<String>, DispatchError> {
        self.values[index]
            .as_list()
            .and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .ok_or_else(|| self.mismatch(index, "list of string-utf8"))
    }
}

/// Execute a call against the ledger
///
/// Read-only methods are forwarded to [`query`]; mutating methods require a
/// sender.
pub fn dispatch(ledger: &mut Ledger, call: &Call) -> Result<Value, DispatchError> {
    let method = Method::resolve(&call.contract, &call.method)?;
    debug!("Dispatching {}.{}", call.contract, method.name());

    if method.is_read_only() {
        return run_query(ledger, method, &call.args);
    }

    let sender = call
        .sender
        .as_ref()
        .ok_or_else(|| DispatchError::MissingSender(method.name().to_string()))?;
    let values = call.args.as_slice();

    let value = match method {
        Method::RegisterIngredient => {
            let args = Args::new(method, values, 5)?;
            let id = ledger.register_ingredient(
                args.string(0)?,
                args.string(1)?,
                args.string(2)?,
                args.uint(3)?,
                args.string(4)?,
                sender,
            );
            Value::ok(Value::UInt(id))
        }
        Method::CreateBatch => {
            let args = Args::new(method, values, 2)?;
            let id = ledger.create_batch(args.string(0)?, args.uint_list(1)?, sender);
            Value::ok(Value::UInt(id))
        }
        Method::AddBatchStep => {
            let args = Args::new(method, values, 3)?;
            let result =
                ledger.add_batch_step(args.uint(0)?, args.string(1)?, args.string(2)?, sender);
            Value::response(result, Value::UInt)
        }
        Method::UpdateBatchStatus => {
            let args = Args::new(method, values, 2)?;
            let result = ledger.update_batch_status(args.uint(0)?, args.string(1)?, sender);
            Value::response(result, |()| Value::Bool(true))
        }
        Method::RecordTest => {
            let args = Args::new(method, values, 4)?;
            let id = ledger.record_test(
                args.uint(0)?,
                args.string(1)?,
                args.string(2)?,
                args.boolean(3)?,
                sender,
            );
            Value::ok(Value::UInt(id))
        }
        Method::RegisterCertifier => {
            let args = Args::new(method, values, 3)?;
            let result = ledger.register_certifier(
                args.principal(0)?,
                args.string(1)?,
                args.string_list(2)?,
                sender,
            );
            Value::response(result, |()| Value::Bool(true))
        }
        Method::SetCertifierActive => {
            let args = Args::new(method, values, 2)?;
            let result = ledger.set_certifier_active(&args.principal(0)?, args.boolean(1)?, sender);
            Value::response(result, |()| Value::Bool(true))
        }
        Method::IssueCertification => {
            let args = Args::new(method, values, 4)?;
            let result = ledger.issue_certification(
                args.uint(0)?,
                args.string(1)?,
                args.uint(2)?,
                args.string(3)?,
                sender,
            );
            Value::response(result, |()| Value::Bool(true))
        }
        _ => return run_query(ledger, method, values),
    };

    Ok(value)
}

/// Execute a read-only call
///
/// Needs only shared access to the ledger. Mutating methods are refused.
pub fn query(ledger: &Ledger, call: &Call) -> Result<Value, DispatchError> {
    let method = Method::resolve(&call.contract, &call.method)?;
    if !method.is_read_only() {
        return Err(DispatchError::NotReadOnly(method.name().to_string()));
    }
    run_query(ledger, method, &call.args)
}

fn run_query(ledger: &Ledger, method: Method, values: &[Value]) -> Result<Value, DispatchError> {
    let value = match method {
        Method::GetIngredient => {
            let args = Args::new(method, values, 1)?;
            Value::optional(ledger.ingredients().get(args.uint(0)?).map(Value::from))
        }
        Method::GetLastIngredientId => {
            Args::new(method, values, 0)?;
            Value::UInt(ledger.ingredients().last_id())
        }
        Method::GetBatch => {
            let args = Args::new(method, values, 1)?;
            Value::optional(ledger.batches().get_batch(args.uint(0)?).map(Value::from))
        }
        Method::GetBatchStep => {
            let args = Args::new(method, values, 2)?;
            Value::optional(
                ledger
                    .batches()
                    .get_step(args.uint(0)?, args.uint(1)?)
                    .map(Value::from),
            )
        }
        Method::GetLastBatchId => {
            Args::new(method, values, 0)?;
            Value::UInt(ledger.batches().last_batch_id())
        }
        Method::GetLastStepId => {
            Args::new(method, values, 0)?;
            Value::UInt(ledger.batches().last_step_id())
        }
        Method::GetTest => {
            let args = Args::new(method, values, 1)?;
            Value::optional(ledger.quality().get_test(args.uint(0)?).map(Value::from))
        }
        Method::GetLastTestId => {
            Args::new(method, values, 0)?;
            Value::UInt(ledger.quality().last_test_id())
        }
        Method::IsCertified => {
            let args = Args::new(method, values, 2)?;
            Value::Bool(ledger.is_certified(args.uint(0)?, &args.string(1)?))
        }
        Method::GetCertifier => {
            let args = Args::new(method, values, 1)?;
            Value::optional(
                ledger
                    .certification()
                    .get_certifier(&args.principal(0)?)
                    .map(Value::from),
            )
        }
        Method::GetContractOwner => {
            Args::new(method, values, 0)?;
            Value::Principal(ledger.certification().owner().clone())
        }
        _ => return Err(DispatchError::NotReadOnly(method.name().to_string())),
    };

    Ok(value)
}
