use std::fmt::{Display, Formatter};

/// One stage of a composite action. Errors and results carry these so a
/// caller can tell how far an action got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStep {
    DeriveAddress,
    FindTransactions,
    ResolveInputs,
    GetBalances,
    PrepareBundle,
    Sign,
    Attach,
    Broadcast,
    Store,
}

impl ActionStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStep::DeriveAddress => "derive address",
            ActionStep::FindTransactions => "find transactions",
            ActionStep::ResolveInputs => "resolve inputs",
            ActionStep::GetBalances => "get balances",
            ActionStep::PrepareBundle => "prepare bundle",
            ActionStep::Sign => "sign",
            ActionStep::Attach => "attach",
            ActionStep::Broadcast => "broadcast",
            ActionStep::Store => "store",
        }
    }
}

impl Display for ActionStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
