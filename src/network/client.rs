//! Remote contract access
//!
//! `KeeperRpc` is the seam between the keeper cycle and the chain. The cycle
//! only ever talks to this trait; `AlloyKeeperClient` implements it on top of
//! an alloy provider and tests substitute an in-memory implementation.

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
    sol_types::SolValue,
    transports::TransportError,
};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use crate::{
    errors::{decode_revert_data, KeeperError, BotResult, RevertKind},
    types::{selector, ContractProfile, Direction, MagnitudeKind, OpportunitySnapshot, TriggerReceipt},
};

pub type SharedProvider = Arc<dyn Provider>;

#[async_trait]
pub trait KeeperRpc: Send + Sync {
    /// Address every transaction is sent from.
    fn signer(&self) -> Address;

    async fn chain_id(&self) -> BotResult<u64>;

    async fn arb_opportunity(&self) -> BotResult<OpportunitySnapshot>;

    /// Threshold configured on the spread contract, in basis points.
    async fn threshold_bps(&self) -> BotResult<u64>;

    async fn action_enabled(&self) -> BotResult<bool>;

    /// `None` when the deployed contract has no keeper allow-list.
    async fn is_authorized(&self, account: Address) -> BotResult<Option<bool>>;

    async fn native_balance(&self, account: Address) -> BotResult<U256>;

    /// Runs the trigger as an `eth_call` from the signer without broadcasting.
    async fn simulate_trigger(&self) -> BotResult<()>;

    /// Broadcasts the trigger and waits for it to be mined.
    async fn send_trigger(&self, gas_limit: u64) -> BotResult<TriggerReceipt>;
}

pub struct AlloyKeeperClient {
    provider: SharedProvider,
    signer: Address,
    spread_contract: Address,
    sync_contract: Address,
    profile: ContractProfile,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
}

impl AlloyKeeperClient {
    pub fn new(
        provider: SharedProvider,
        signer: Address,
        spread_contract: Address,
        sync_contract: Address,
        profile: ContractProfile,
        rpc_timeout: Duration,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            signer,
            spread_contract,
            sync_contract,
            profile,
            rpc_timeout,
            confirmation_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> BotResult<T>
    where
        F: Future<Output = BotResult<T>>,
    {
        tokio::time::timeout(self.rpc_timeout, fut)
            .await
            .map_err(|_| KeeperError::Timeout { operation, after: self.rpc_timeout })?
    }

    async fn view_call(
        &self,
        operation: &'static str,
        contract: Address,
        calldata: Vec<u8>,
    ) -> BotResult<Vec<u8>> {
        let tx = TransactionRequest::default()
            .from(self.signer)
            .to(contract)
            .input(calldata.into());

        self.bounded(operation, async {
            let output = self
                .provider
                .call(&tx)
                .await
                .map_err(|e| map_call_error(operation, contract, e))?;
            Ok(output.to_vec())
        })
        .await
    }

    async fn view_bool(&self, operation: &'static str, contract: Address, calldata: Vec<u8>) -> BotResult<bool> {
        let raw = self.view_call(operation, contract, calldata).await?;
        bool::abi_decode(&raw, true).map_err(|e| KeeperError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl KeeperRpc for AlloyKeeperClient {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn chain_id(&self) -> BotResult<u64> {
        self.bounded("eth_chainId", async {
            self.provider
                .get_chain_id()
                .await
                .map_err(|e| KeeperError::rpc("eth_chainId", e))
        })
        .await
    }

    async fn arb_opportunity(&self) -> BotResult<OpportunitySnapshot> {
        let operation = self.profile.opportunity_query;
        let raw = self
            .view_call(operation, self.spread_contract, selector(operation).to_vec())
            .await?;
        let (available, magnitude, flag) = <(bool, U256, bool)>::abi_decode(&raw, true)
            .map_err(|e| KeeperError::Decode { operation, message: e.to_string() })?;

        if !available {
            return Ok(OpportunitySnapshot::unavailable());
        }

        let direction = Direction::from(flag);
        Ok(match self.profile.magnitude {
            MagnitudeKind::GapBasisPoints => {
                OpportunitySnapshot::with_gap(magnitude.saturating_to::<u64>(), direction)
            }
            MagnitudeKind::OptimalAmount => OpportunitySnapshot::with_amount(magnitude, direction),
        })
    }

    async fn threshold_bps(&self) -> BotResult<u64> {
        let operation = self.profile.threshold_query;
        let raw = self
            .view_call(operation, self.spread_contract, selector(operation).to_vec())
            .await?;
        let threshold = U256::abi_decode(&raw, true)
            .map_err(|e| KeeperError::Decode { operation, message: e.to_string() })?;
        Ok(threshold.saturating_to::<u64>())
    }

    async fn action_enabled(&self) -> BotResult<bool> {
        let check = &self.profile.enabled_check;
        let operation = check.signature();
        let raw = self
            .view_bool(operation, self.sync_contract, selector(operation).to_vec())
            .await?;
        Ok(check.interpret(raw))
    }

    async fn is_authorized(&self, account: Address) -> BotResult<Option<bool>> {
        let Some(operation) = self.profile.keeper_check else {
            return Ok(None);
        };

        let mut calldata = selector(operation).to_vec();
        calldata.extend_from_slice(&[0u8; 12]);
        calldata.extend_from_slice(account.as_slice());

        self.view_bool(operation, self.sync_contract, calldata).await.map(Some)
    }

    async fn native_balance(&self, account: Address) -> BotResult<U256> {
        self.bounded("eth_getBalance", async {
            self.provider
                .get_balance(account)
                .await
                .map_err(|e| KeeperError::rpc("eth_getBalance", e))
        })
        .await
    }

    async fn simulate_trigger(&self) -> BotResult<()> {
        let operation = self.profile.trigger;
        self.view_call(operation, self.sync_contract, selector(operation).to_vec())
            .await
            .map(|_| ())
    }

    async fn send_trigger(&self, gas_limit: u64) -> BotResult<TriggerReceipt> {
        let operation = self.profile.trigger;
        let tx = TransactionRequest::default()
            .from(self.signer)
            .to(self.sync_contract)
            .input(selector(operation).to_vec().into())
            .gas_limit(gas_limit);

        let pending = self
            .bounded(operation, async {
                self.provider
                    .send_transaction(tx)
                    .await
                    .map_err(|e| map_call_error(operation, self.sync_contract, e))
            })
            .await?;

        let tx_hash = *pending.tx_hash();
        info!("📡 Trigger {} sent: {:?} (gas limit {})", operation, tx_hash, gas_limit);

        let receipt = tokio::select! {
            result = pending.get_receipt() => {
                result.map_err(|e| KeeperError::rpc("eth_getTransactionReceipt", e))?
            }
            _ = tokio::time::sleep(self.confirmation_timeout) => {
                return Err(KeeperError::Timeout {
                    operation: "eth_getTransactionReceipt",
                    after: self.confirmation_timeout,
                });
            }
        };

        debug!("Receipt for {:?}: status={}, block={:?}", tx_hash, receipt.status(), receipt.block_number);

        Ok(TriggerReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: u64::try_from(receipt.gas_used).unwrap_or(u64::MAX),
            effective_gas_price: u128::from(receipt.effective_gas_price),
            succeeded: receipt.status(),
        })
    }
}

/// Maps a failed `eth_call`/`eth_sendTransaction` to a revert when the node
/// reports one, keeping any revert data for structured classification.
pub fn map_call_error(operation: &'static str, contract: Address, error: TransportError) -> KeeperError {
    if let Some(payload) = error.as_error_resp() {
        if let Some(data) = payload.as_revert_data() {
            let (kind, reason) = decode_revert_data(&data);
            let reason = reason.or_else(|| Some(payload.message.to_string()));
            return KeeperError::Revert { operation, contract, kind, reason };
        }
        if payload.message.to_ascii_lowercase().contains("revert") {
            return KeeperError::Revert {
                operation,
                contract,
                kind: RevertKind::Unknown,
                reason: Some(payload.message.to_string()),
            };
        }
    }
    KeeperError::rpc(operation, error)
}
