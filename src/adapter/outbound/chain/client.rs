//! JSON-RPC client for the deployed market contracts.
//!
//! Reads go through a plain HTTP provider. Writes build a wallet-backed
//! provider from the configured private key, send, and wait for the receipt.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::network::{Ethereum, EthereumWallet};
use alloy_provider::{PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::info;
use url::Url;

use super::abi;
use crate::domain::id::MarketId;
use crate::domain::market::{EventInfo, MarketReserves, TradeSide, UserPosition};
use crate::domain::resolution::{ResolutionInfo, ResolutionState};
use crate::error::{ChainError, ConfigError, Result};
use crate::port::outbound::chain::{
    CreateEventRequest, EventFactory, FeeSchedule, MarketAmm, ResolutionManager, TxReceipt,
    UsdcToken,
};

/// Addresses of the protocol contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub usdc: Address,
    pub fee_config: Address,
    pub event_factory: Address,
    pub resolution_manager: Address,
}

pub struct ChainClient {
    rpc_url: Url,
    addresses: ContractAddresses,
    signer: Option<PrivateKeySigner>,
}

impl ChainClient {
    /// Create a client. Without a private key the client is read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC URL or the private key is malformed.
    pub fn new(rpc_url: &str, addresses: ContractAddresses, private_key: Option<&str>) -> Result<Self> {
        let rpc_url: Url = rpc_url.parse().map_err(|e: url::ParseError| ConfigError::InvalidValue {
            field: "chain.rpc_url",
            reason: e.to_string(),
        })?;

        let signer = private_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| {
                PrivateKeySigner::from_str(k).map_err(|e| ConfigError::InvalidValue {
                    field: "WALLET_PRIVATE_KEY",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            rpc_url,
            addresses,
            signer,
        })
    }

    /// Address of the configured wallet, if any.
    #[must_use]
    pub fn wallet_address(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    #[must_use]
    pub const fn addresses(&self) -> &ContractAddresses {
        &self.addresses
    }

    fn reader(&self) -> impl Provider {
        ProviderBuilder::new().connect_http(self.rpc_url.clone())
    }

    fn writer(&self) -> Result<impl Provider> {
        let signer = self.signer.clone().ok_or(ChainError::WalletNotConfigured)?;
        Ok(ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.rpc_url.clone()))
    }
}

fn call_failed(call: &'static str) -> impl FnOnce(alloy_contract::Error) -> ChainError {
    move |e| ChainError::CallFailed {
        call,
        reason: e.to_string(),
    }
}

fn send_failed(call: &'static str) -> impl FnOnce(alloy_contract::Error) -> ChainError {
    move |e| ChainError::SendFailed {
        call,
        reason: e.to_string(),
    }
}

/// Wait for the receipt and fail on revert.
async fn confirm(call: &'static str, pending: PendingTransactionBuilder<Ethereum>) -> Result<TxReceipt> {
    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ChainError::ReceiptFailed {
            call,
            reason: e.to_string(),
        })?;

    let tx_hash = format!("{:?}", receipt.transaction_hash);
    if !receipt.status() {
        return Err(ChainError::Reverted { tx_hash }.into());
    }

    info!(call, tx_hash = %tx_hash, block = ?receipt.block_number, "Transaction confirmed");
    Ok(TxReceipt {
        tx_hash,
        block_number: receipt.block_number,
    })
}

#[async_trait]
impl EventFactory for ChainClient {
    fn address(&self) -> Address {
        self.addresses.event_factory
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<TxReceipt> {
        info!(
            category = %request.category,
            title = %request.title,
            resolve_at = request.resolve_at,
            liquidity = %request.initial_liquidity,
            "Sending createEvent"
        );
        let provider = self.writer()?;
        let factory = abi::EventFactory::new(self.addresses.event_factory, &provider);
        let pending = factory
            .createEvent(
                request.category.clone(),
                request.title.clone(),
                request.description.clone(),
                U256::from(request.resolve_at),
                request.primary_source.clone(),
                Bytes::from(request.rule_bytes.clone()),
                request.initial_liquidity,
            )
            .send()
            .await
            .map_err(send_failed("createEvent"))?;
        confirm("createEvent", pending).await
    }

    async fn get_event(&self, id: MarketId) -> Result<EventInfo> {
        let provider = self.reader();
        let factory = abi::EventFactory::new(self.addresses.event_factory, &provider);
        let record = factory
            .getEvent(id.as_b256())
            .call()
            .await
            .map_err(call_failed("getEvent"))?;

        Ok(EventInfo {
            market_id: id,
            creator: record.creator,
            amm_address: record.ammAddress,
            created_at: record.createdAt.saturating_to(),
            resolve_at: record.resolveAt.saturating_to(),
            category: record.category,
            title: record.title,
            description: record.description,
            primary_source: record.primarySource,
            rule_bytes: record.ruleBytes.to_vec(),
            create_bond_amount: record.createBondAmount,
            bond_refunded: record.bondRefunded,
            finalized: record.finalized,
        })
    }

    async fn creator_events(&self, creator: Address) -> Result<Vec<MarketId>> {
        let provider = self.reader();
        let factory = abi::EventFactory::new(self.addresses.event_factory, &provider);
        let ids = factory
            .getCreatorEvents(creator)
            .call()
            .await
            .map_err(call_failed("getCreatorEvents"))?;
        Ok(ids.into_iter().map(MarketId::new).collect())
    }
}

#[async_trait]
impl MarketAmm for ChainClient {
    async fn market_data(&self, amm: Address) -> Result<MarketReserves> {
        let provider = self.reader();
        let data = abi::MarketAMM::new(amm, &provider)
            .getMarketData()
            .call()
            .await
            .map_err(call_failed("getMarketData"))?;
        Ok(MarketReserves {
            yes_reserve: data.yesReserve,
            no_reserve: data.noReserve,
            liquidity_usd: data.liquidityUsd,
            volume_usd: data.volumeUsd,
            total_lp_supply: data.totalLpSupply,
        })
    }

    async fn user_position(&self, amm: Address, user: Address) -> Result<UserPosition> {
        let provider = self.reader();
        let position = abi::MarketAMM::new(amm, &provider)
            .getUserPosition(user)
            .call()
            .await
            .map_err(call_failed("getUserPosition"))?;
        Ok(UserPosition {
            yes_tokens: position.yesTokens,
            no_tokens: position.noTokens,
            lp_tokens: position.lpTokens,
        })
    }

    async fn buy(
        &self,
        amm: Address,
        side: TradeSide,
        amount_in: U256,
        min_tokens_out: U256,
    ) -> Result<TxReceipt> {
        info!(amm = %amm, side = ?side, amount_in = %amount_in, "Sending buy");
        let provider = self.writer()?;
        let market = abi::MarketAMM::new(amm, &provider);
        let (call, pending) = match side {
            TradeSide::Yes => (
                "buyYes",
                market.buyYes(amount_in, min_tokens_out).send().await.map_err(send_failed("buyYes"))?,
            ),
            TradeSide::No => (
                "buyNo",
                market.buyNo(amount_in, min_tokens_out).send().await.map_err(send_failed("buyNo"))?,
            ),
        };
        confirm(call, pending).await
    }

    async fn provide_liquidity(&self, amm: Address, amount_in: U256) -> Result<TxReceipt> {
        info!(amm = %amm, amount_in = %amount_in, "Sending provideLiquidity");
        let provider = self.writer()?;
        let pending = abi::MarketAMM::new(amm, &provider)
            .provideLiquidity(amount_in)
            .send()
            .await
            .map_err(send_failed("provideLiquidity"))?;
        confirm("provideLiquidity", pending).await
    }
}

#[async_trait]
impl ResolutionManager for ChainClient {
    async fn state(&self, id: MarketId) -> Result<ResolutionState> {
        let provider = self.reader();
        let raw = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .getResolutionState(id.as_b256())
            .call()
            .await
            .map_err(call_failed("getResolutionState"))?;
        Ok(ResolutionState::try_from(raw)?)
    }

    async fn resolution(&self, id: MarketId) -> Result<ResolutionInfo> {
        let provider = self.reader();
        let r = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .getResolution(id.as_b256())
            .call()
            .await
            .map_err(call_failed("getResolution"))?;
        Ok(ResolutionInfo::from_raw(
            r.state,
            r.reporter,
            r.reportedOutcome,
            r.evidenceURI,
            r.disputer,
            r.disputeReason,
            r.finalOutcome,
            r.isInvalid,
        )?)
    }

    async fn report(&self, id: MarketId, outcome: bool, evidence_uri: &str) -> Result<TxReceipt> {
        info!(market_id = %id, outcome, evidence_uri, "Sending report");
        let provider = self.writer()?;
        let pending = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .report(id.as_b256(), outcome, evidence_uri.to_string())
            .send()
            .await
            .map_err(send_failed("report"))?;
        confirm("report", pending).await
    }

    async fn dispute(&self, id: MarketId, reason_uri: &str) -> Result<TxReceipt> {
        info!(market_id = %id, reason_uri, "Sending dispute");
        let provider = self.writer()?;
        let pending = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .dispute(id.as_b256(), reason_uri.to_string())
            .send()
            .await
            .map_err(send_failed("dispute"))?;
        confirm("dispute", pending).await
    }

    async fn arbiter_resolve(&self, id: MarketId, outcome: bool) -> Result<TxReceipt> {
        info!(market_id = %id, outcome, "Sending arbiterResolve");
        let provider = self.writer()?;
        let pending = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .arbiterResolve(id.as_b256(), outcome)
            .send()
            .await
            .map_err(send_failed("arbiterResolve"))?;
        confirm("arbiterResolve", pending).await
    }

    async fn invalidate(&self, id: MarketId) -> Result<TxReceipt> {
        info!(market_id = %id, "Sending invalidate");
        let provider = self.writer()?;
        let pending = abi::ResolutionManager::new(self.addresses.resolution_manager, &provider)
            .invalidate(id.as_b256())
            .send()
            .await
            .map_err(send_failed("invalidate"))?;
        confirm("invalidate", pending).await
    }
}

#[async_trait]
impl UsdcToken for ChainClient {
    async fn balance(&self, owner: Address) -> Result<U256> {
        let provider = self.reader();
        Ok(abi::IERC20::new(self.addresses.usdc, &provider)
            .balanceOf(owner)
            .call()
            .await
            .map_err(call_failed("balanceOf"))?)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        let provider = self.reader();
        Ok(abi::IERC20::new(self.addresses.usdc, &provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(call_failed("allowance"))?)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxReceipt> {
        info!(spender = %spender, amount = %amount, "Approving USDC spending");
        let provider = self.writer()?;
        let pending = abi::IERC20::new(self.addresses.usdc, &provider)
            .approve(spender, amount)
            .send()
            .await
            .map_err(send_failed("approve"))?;
        confirm("approve", pending).await
    }

    async fn decimals(&self) -> Result<u8> {
        let provider = self.reader();
        Ok(abi::IERC20::new(self.addresses.usdc, &provider)
            .decimals()
            .call()
            .await
            .map_err(call_failed("decimals"))?)
    }
}

#[async_trait]
impl FeeSchedule for ChainClient {
    async fn create_bond(&self) -> Result<U256> {
        let provider = self.reader();
        Ok(abi::FeeConfig::new(self.addresses.fee_config, &provider)
            .createBond()
            .call()
            .await
            .map_err(call_failed("createBond"))?)
    }
}
