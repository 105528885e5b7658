//! Access gate for saving and exporting reports.
//!
//! Each capability is either unlocked or locked behind a prompt. The gate is
//! owned and mutated by the front end; calculators never touch it.

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Save,
    Export,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Export => "export",
        }
    }
}

/// Paid plan unlocking PDF export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    #[default]
    OneOff,
    Annual,
}

impl Plan {
    pub fn price_eur(&self) -> u32 {
        match self {
            Self::OneOff => 15,
            Self::Annual => 59,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneOff => "One-off PDF",
            Self::Annual => "Annual access",
        }
    }
}

/// What the user must do to unlock a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    SignUp,
    Payment,
}

impl Prompt {
    pub fn message(&self, capability: Capability) -> String {
        match self {
            Self::SignUp => format!("sign up to {} your report", capability.as_str()),
            Self::Payment => format!(
                "purchase a plan to {} your report ({} EUR {} / {} EUR {})",
                capability.as_str(),
                Plan::OneOff.label(),
                Plan::OneOff.price_eur(),
                Plan::Annual.label(),
                Plan::Annual.price_eur(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Unlocked,
    Locked(Prompt),
}

impl GateStatus {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

/// Account state deciding which capabilities are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessGate {
    signed_in: bool,
    plan: Option<Plan>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    pub fn plan(&self) -> Option<Plan> {
        self.plan
    }

    pub fn sign_up(&mut self) {
        self.signed_in = true;
        info!("account signed in");
    }

    /// Record a purchase. Buying without an account has no effect.
    pub fn purchase(&mut self, plan: Plan) {
        if !self.signed_in {
            return;
        }
        self.plan = Some(plan);
        info!(plan = plan.label(), price_eur = plan.price_eur(), "plan purchased");
    }

    /// Saving needs an account; exporting needs an account and a plan.
    pub fn status(&self, capability: Capability) -> GateStatus {
        if !self.signed_in {
            return GateStatus::Locked(Prompt::SignUp);
        }
        match capability {
            Capability::Save => GateStatus::Unlocked,
            Capability::Export if self.plan.is_some() => GateStatus::Unlocked,
            Capability::Export => GateStatus::Locked(Prompt::Payment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_gate_is_locked() {
        let gate = AccessGate::new();
        assert_eq!(gate.status(Capability::Save), GateStatus::Locked(Prompt::SignUp));
        assert_eq!(gate.status(Capability::Export), GateStatus::Locked(Prompt::SignUp));
    }

    #[test]
    fn sign_up_unlocks_save_only() {
        let mut gate = AccessGate::new();
        gate.sign_up();
        assert!(gate.status(Capability::Save).is_unlocked());
        assert_eq!(gate.status(Capability::Export), GateStatus::Locked(Prompt::Payment));
    }

    #[test]
    fn purchase_unlocks_export() {
        let mut gate = AccessGate::new();
        gate.sign_up();
        gate.purchase(Plan::Annual);
        assert_eq!(gate.plan(), Some(Plan::Annual));
        assert!(gate.status(Capability::Export).is_unlocked());
    }

    #[test]
    fn purchase_requires_account() {
        let mut gate = AccessGate::new();
        gate.purchase(Plan::OneOff);
        assert_eq!(gate.plan(), None);
        assert_eq!(gate.status(Capability::Export), GateStatus::Locked(Prompt::SignUp));
    }

    #[test]
    fn prompt_messages() {
        assert_eq!(
            Prompt::SignUp.message(Capability::Save),
            "sign up to save your report"
        );
        let payment = Prompt::Payment.message(Capability::Export);
        assert!(payment.starts_with("purchase a plan to export"));
        assert!(payment.contains("EUR 15"));
        assert!(payment.contains("EUR 59"));
    }

    #[test]
    fn plan_serialises_kebab_case() {
        assert_eq!(serde_json::to_string(&Plan::OneOff).unwrap(), "\"one-off\"");
        assert_eq!(serde_json::to_string(&Plan::Annual).unwrap(), "\"annual\"");
    }
}
