//! USDC balance and approvals for the configured wallet.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::money::{from_base_units, to_base_units};
use crate::error::{ChainError, Result};
use crate::port::outbound::chain::{TxReceipt, UsdcToken};

pub struct WalletService {
    usdc: Arc<dyn UsdcToken>,
    owner: Option<Address>,
}

impl WalletService {
    pub fn new(usdc: Arc<dyn UsdcToken>, owner: Option<Address>) -> Self {
        Self { usdc, owner }
    }

    /// # Errors
    ///
    /// Returns [`ChainError::WalletNotConfigured`] when no wallet is set.
    pub fn owner(&self) -> Result<Address> {
        self.owner.ok_or_else(|| ChainError::WalletNotConfigured.into())
    }

    /// USDC balance in dollars.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the read fails.
    pub async fn balance(&self) -> Result<Decimal> {
        let units = self.usdc.balance(self.owner()?).await?;
        Ok(from_base_units(units))
    }

    /// Raw allowance granted to `spender`, in base units.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the read fails.
    pub async fn allowance(&self, spender: Address) -> Result<U256> {
        self.usdc.allowance(self.owner()?, spender).await
    }

    /// Approve `spender` for `amount` dollars, or without limit when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if no wallet is configured or the transaction fails.
    pub async fn approve(&self, spender: Address, amount: Option<Decimal>) -> Result<TxReceipt> {
        self.owner()?;
        let units = amount.map_or(U256::MAX, to_base_units);
        info!(spender = %spender, unlimited = amount.is_none(), "Approving USDC");
        self.usdc.approve(spender, units).await
    }

    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn decimals(&self) -> Result<u8> {
        self.usdc.decimals().await
    }
}
