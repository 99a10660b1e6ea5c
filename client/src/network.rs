//! Deployment targets and where their contracts live.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const LOCAL_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// Amount the local faucet sends per request, 0.1 XLM in stroops.
pub const FAUCET_AMOUNT: i128 = 1_000_000;

const TESTNET_PASS_CONTRACT: &str = "CCG33GUN6KYN5IBVNMOLTRYFFHU2KG2UGTAM3G43WMTV75CWEVJNYURI";
const TESTNET_HALLOWEEN_CONTRACT: &str = "CA7FH5LOGYDLBM27KLLMRN7XALAX553TU2MFUU27DOLKFI3ELAUQVNTV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Local,
}

impl Network {
    /// Picks the network the wallet is connected to.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, ClientError> {
        match passphrase {
            TESTNET_PASSPHRASE => Ok(Network::Testnet),
            LOCAL_PASSPHRASE => Ok(Network::Local),
            other => Err(ClientError::Config(format!("unsupported network passphrase {:?}", other))),
        }
    }

    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_PASSPHRASE,
            Network::Local => LOCAL_PASSPHRASE,
        }
    }

    pub fn is_local(&self) -> bool {
        *self == Network::Local
    }
}

/// Contract addresses of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    pub pass: String,
    pub halloween: String,
}

impl Deployments {
    pub fn testnet() -> Self {
        Deployments { pass: TESTNET_PASS_CONTRACT.into(), halloween: TESTNET_HALLOWEEN_CONTRACT.into() }
    }

    /// Reads the file the deploy step writes for the local network:
    /// `{ "pass": "C...", "halloween": "C..." }`.
    pub fn with_local_json(json: &str) -> Result<Self, ClientError> {
        let deployments: Deployments =
            serde_json::from_str(json).map_err(|e| ClientError::Config(format!("deployment file: {}", e)))?;
        deployments.validate()?;
        Ok(deployments)
    }

    /// Addresses for `network`. Local ones need the deployment file.
    pub fn for_network(network: Network, local_json: Option<&str>) -> Result<Self, ClientError> {
        match (network, local_json) {
            (Network::Testnet, _) => Ok(Self::testnet()),
            (Network::Local, Some(json)) => Self::with_local_json(json),
            (Network::Local, None) => Err(ClientError::Config("no local deployment file".into())),
        }
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.pass.is_empty() || self.halloween.is_empty() {
            return Err(ClientError::Config("empty contract address".into()))
        }
        if self.pass == self.halloween {
            return Err(ClientError::Config("pass and halloween share one address".into()))
        }
        Ok(())
    }
}
