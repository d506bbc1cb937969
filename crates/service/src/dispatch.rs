//! Named entry points as submitted by a ledger runtime: a function name plus
//! positional string arguments.
//!
//! Both the generic names (`ReadRecord`) and the kind-specific names the
//! registry was originally deployed with (`ReadAsset`, `ReadCustomer`) resolve
//! to the same operation.

use models::{Record, RecordKind};
use tracing::instrument;

use crate::contract::RegistryContract;
use crate::errors::ServiceError;
use crate::state::StateStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    InitializeLedger,
    ReadRecord,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
    RecordExists,
    TransferRecord,
    GetAllRecords,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::InitializeLedger,
        Function::ReadRecord,
        Function::CreateRecord,
        Function::UpdateRecord,
        Function::DeleteRecord,
        Function::RecordExists,
        Function::TransferRecord,
        Function::GetAllRecords,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::InitializeLedger => "InitializeLedger",
            Function::ReadRecord => "ReadRecord",
            Function::CreateRecord => "CreateRecord",
            Function::UpdateRecord => "UpdateRecord",
            Function::DeleteRecord => "DeleteRecord",
            Function::RecordExists => "RecordExists",
            Function::TransferRecord => "TransferRecord",
            Function::GetAllRecords => "GetAllRecords",
        }
    }

    /// Kind-specific entry point name, e.g. `TransferCustomer` or `GetAllAssets`.
    pub fn kind_name(self, kind: RecordKind) -> String {
        let label = kind.label();
        match self {
            Function::InitializeLedger => "InitLedger".to_string(),
            Function::ReadRecord => format!("Read{label}"),
            Function::CreateRecord => format!("Create{label}"),
            Function::UpdateRecord => format!("Update{label}"),
            Function::DeleteRecord => format!("Delete{label}"),
            Function::RecordExists => format!("{label}Exists"),
            Function::TransferRecord => format!("Transfer{label}"),
            Function::GetAllRecords => format!("GetAll{label}s"),
        }
    }

    pub fn resolve(kind: RecordKind, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name || f.kind_name(kind) == name)
    }

    /// Names of the positional arguments, in order.
    pub fn params(self) -> &'static [&'static str] {
        match self {
            Function::InitializeLedger | Function::GetAllRecords => &[],
            Function::ReadRecord | Function::DeleteRecord | Function::RecordExists => &["id"],
            Function::CreateRecord | Function::UpdateRecord => {
                &["id", "name", "gender", "pan", "aadarNo", "bank"]
            }
            Function::TransferRecord => &["id", "newPan"],
        }
    }
}

fn parse_number(param: &str, raw: &str) -> Result<u64, ServiceError> {
    raw.trim().parse::<u64>().map_err(|_| {
        ServiceError::InvalidArgument(format!("{param} must be an unsigned integer, got `{raw}`"))
    })
}

fn record_from_args(args: &[String]) -> Result<Record, ServiceError> {
    Ok(Record::new(
        args[0].as_str(),
        args[1].as_str(),
        args[2].as_str(),
        parse_number("pan", &args[3])?,
        parse_number("aadarNo", &args[4])?,
        args[5].as_str(),
    ))
}

impl RegistryContract {
    /// Run the entry point named `function` with positional `args`.
    ///
    /// Returns the textual payload of the operation, or `None` for operations
    /// that only have side effects. `RecordExists` answers `"true"`/`"false"`.
    #[instrument(skip(self, ctx, args), fields(kind = %self.kind()))]
    pub async fn invoke(
        &self,
        ctx: &dyn StateStore,
        function: &str,
        args: &[String],
    ) -> Result<Option<String>, ServiceError> {
        let f = Function::resolve(self.kind(), function)
            .ok_or_else(|| ServiceError::UnknownFunction(function.to_string()))?;
        let params = f.params();
        if args.len() != params.len() {
            return Err(ServiceError::InvalidArgument(format!(
                "{} expects {} argument(s) ({}), got {}",
                f.name(),
                params.len(),
                params.join(", "),
                args.len()
            )));
        }

        match f {
            Function::InitializeLedger => self.initialize_ledger(ctx).await.map(|_| None),
            Function::ReadRecord => self.read_record(ctx, &args[0]).await.map(Some),
            Function::CreateRecord => {
                let record = record_from_args(args)?;
                self.create_record(ctx, record).await.map(Some)
            }
            Function::UpdateRecord => {
                let record = record_from_args(args)?;
                self.update_record(ctx, record).await.map(|_| None)
            }
            Function::DeleteRecord => self.delete_record(ctx, &args[0]).await.map(|_| None),
            Function::RecordExists => self
                .record_exists(ctx, &args[0])
                .await
                .map(|exists| Some(exists.to_string())),
            Function::TransferRecord => {
                let new_pan = parse_number("newPan", &args[1])?;
                self.transfer_record(ctx, &args[0], new_pan).await.map(|_| None)
            }
            Function::GetAllRecords => self.get_all_records(ctx).await.map(Some),
        }
    }
}
