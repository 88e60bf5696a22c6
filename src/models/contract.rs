use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub faction_symbol: String,
    #[serde(rename = "type")]
    pub contract_type: String,
    pub terms: ContractTerms,
    pub accepted: bool,
    pub fulfilled: bool,
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub deadline_to_accept: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContractTerms {
    pub deadline: String,
    pub payment: Payment,
    #[serde(default)]
    pub deliver: Vec<DeliveryItem>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub on_accepted: i64,
    pub on_fulfilled: i64,
}

/// Goods a procurement contract wants delivered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub trade_symbol: String,
    pub destination_symbol: String,
    pub units_required: i32,
    pub units_fulfilled: i32,
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contract Expires {}", self.expiration.as_deref().unwrap_or("-"))?;
        writeln!(f, "\t{}", self.id)?;
        writeln!(f, "\t{}", self.faction_symbol)?;
        writeln!(f, "\tType\t{}", self.contract_type)?;
        writeln!(f, "\tTerms")?;
        writeln!(f, "\t\tDeadline\t{}", self.terms.deadline)?;
        writeln!(f, "\t\tUp Front\t{}c", self.terms.payment.on_accepted)?;
        writeln!(f, "\t\tFulfilled\t{}c", self.terms.payment.on_fulfilled)?;
        for item in &self.terms.deliver {
            writeln!(
                f,
                "\t\tDeliver\t{} {}/{} to {}",
                item.trade_symbol, item.units_fulfilled, item.units_required, item.destination_symbol
            )?;
        }
        if !self.accepted {
            if let Some(deadline) = &self.deadline_to_accept {
                writeln!(f, "\tDeadlineToAccept\t{deadline}")?;
            }
        }
        if self.fulfilled {
            writeln!(f, "\tFULFILLED")?;
        }
        Ok(())
    }
}
