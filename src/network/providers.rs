//! Network provider setup and signing identity

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use anyhow::Context;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};
use crate::{
    config::Config,
    errors::{KeeperError, BotResult},
    network::{
        client::{AlloyKeeperClient, SharedProvider},
        retry::{retry_with_backoff, RetryConfig},
    },
};

/// The single credential every trigger is signed with.
#[derive(Clone)]
pub struct SigningIdentity {
    address: Address,
    wallet: EthereumWallet,
}

impl SigningIdentity {
    pub fn from_config(config: &Config) -> BotResult<Self> {
        let signer = PrivateKeySigner::from_str(config.private_key.expose()).map_err(|e| KeeperError::Signer {
            message: format!("Failed to parse PRIVATE_KEY: {}", e),
        })?;
        Ok(Self {
            address: signer.address(),
            wallet: EthereumWallet::from(signer),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity").field("address", &self.address).finish_non_exhaustive()
    }
}

/// Builds a provider that fills nonce, fees and chain id and signs with `identity`.
pub async fn setup_signing_provider(config: &Config, identity: &SigningIdentity) -> BotResult<SharedProvider> {
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(identity.wallet().clone())
        .on_builtin(&config.rpc_url)
        .await
        .map_err(|e| KeeperError::rpc("connect", e))?;

    let provider: SharedProvider = Arc::new(provider);

    info!("🔗 Testing connection to {}...", config.rpc_url);
    let block = retry_with_backoff(
        || async {
            provider.get_block_number().await
                .context("Failed to get block number")
        },
        &RetryConfig::default(),
        "startup connectivity check",
    ).await
    .inspect_err(|e| warn!("⚠️ Network connection failed: {}", e))?;

    info!("✅ Connected at block {}", block);
    Ok(provider)
}

/// Wires configuration, identity and provider into the production client.
pub async fn connect_keeper_client(config: &Config) -> BotResult<AlloyKeeperClient> {
    let identity = SigningIdentity::from_config(config)?;
    let provider = setup_signing_provider(config, &identity).await?;

    Ok(AlloyKeeperClient::new(
        provider,
        identity.address(),
        config.spread_contract,
        config.sync_contract,
        config.profile.clone(),
        config.rpc_timeout,
        config.confirmation_timeout,
    ))
}
