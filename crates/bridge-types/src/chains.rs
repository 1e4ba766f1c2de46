//! Chain identity: families, networks and the closed set of known chains.
//!
//! Every chain belongs to exactly one [`ChainFamily`]. The hub family settles
//! all cross-family transfers; every other family is a spoke. The enums are
//! matched exhaustively throughout routing, so a new family or EVM chain must
//! be handled everywhere before the workspace compiles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Mainnet or testnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
	Mainnet,
	Testnet,
}

impl NetworkType {
	pub const ALL: [NetworkType; 2] = [NetworkType::Mainnet, NetworkType::Testnet];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Mainnet => "mainnet",
			Self::Testnet => "testnet",
		}
	}
}

impl fmt::Display for NetworkType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NetworkType {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"mainnet" => Ok(Self::Mainnet),
			"testnet" => Ok(Self::Testnet),
			other => Err(ParseIdError::new("network", other)),
		}
	}
}

/// Chain family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	Bitcoin,
	Stacks,
	Evm,
	Brc20,
	Runes,
	Solana,
	Tron,
}

impl ChainFamily {
	pub const ALL: [ChainFamily; 7] = [
		ChainFamily::Bitcoin,
		ChainFamily::Stacks,
		ChainFamily::Evm,
		ChainFamily::Brc20,
		ChainFamily::Runes,
		ChainFamily::Solana,
		ChainFamily::Tron,
	];

	/// Families whose routes are reported by the backend route provider.
	pub const PROVIDER_BACKED: [ChainFamily; 5] = [
		ChainFamily::Evm,
		ChainFamily::Brc20,
		ChainFamily::Runes,
		ChainFamily::Solana,
		ChainFamily::Tron,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bitcoin => "bitcoin",
			Self::Stacks => "stacks",
			Self::Evm => "evm",
			Self::Brc20 => "brc20",
			Self::Runes => "runes",
			Self::Solana => "solana",
			Self::Tron => "tron",
		}
	}

	/// The hub family is the settlement chain every transfer routes through.
	pub fn is_hub(&self) -> bool {
		matches!(self, Self::Stacks)
	}

	pub fn is_provider_backed(&self) -> bool {
		Self::PROVIDER_BACKED.contains(self)
	}
}

impl fmt::Display for ChainFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ChainFamily {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|family| family.as_str() == s)
			.ok_or_else(|| ParseIdError::new("chain family", s))
	}
}

/// Known EVM chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvmChain {
	Ethereum,
	Sepolia,
	Bsc,
	BscTestnet,
	CoreDao,
	CoreDaoTestnet,
	Bsquared,
	Bob,
	Bitlayer,
	Lorenzo,
	Merlin,
	AiLayer,
	Mode,
	XLayer,
	Arbitrum,
	Aurora,
	Manta,
	Linea,
	Base,
}

impl EvmChain {
	pub const ALL: [EvmChain; 19] = [
		EvmChain::Ethereum,
		EvmChain::Sepolia,
		EvmChain::Bsc,
		EvmChain::BscTestnet,
		EvmChain::CoreDao,
		EvmChain::CoreDaoTestnet,
		EvmChain::Bsquared,
		EvmChain::Bob,
		EvmChain::Bitlayer,
		EvmChain::Lorenzo,
		EvmChain::Merlin,
		EvmChain::AiLayer,
		EvmChain::Mode,
		EvmChain::XLayer,
		EvmChain::Arbitrum,
		EvmChain::Aurora,
		EvmChain::Manta,
		EvmChain::Linea,
		EvmChain::Base,
	];

	pub fn slug(&self) -> &'static str {
		match self {
			Self::Ethereum => "ethereum",
			Self::Sepolia => "sepolia",
			Self::Bsc => "bsc",
			Self::BscTestnet => "bsc-testnet",
			Self::CoreDao => "coredao",
			Self::CoreDaoTestnet => "coredao-testnet",
			Self::Bsquared => "bsquared",
			Self::Bob => "bob",
			Self::Bitlayer => "bitlayer",
			Self::Lorenzo => "lorenzo",
			Self::Merlin => "merlin",
			Self::AiLayer => "ailayer",
			Self::Mode => "mode",
			Self::XLayer => "xlayer",
			Self::Arbitrum => "arbitrum",
			Self::Aurora => "aurora",
			Self::Manta => "manta",
			Self::Linea => "linea",
			Self::Base => "base",
		}
	}

	pub fn from_slug(slug: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|chain| chain.slug() == slug)
	}

	pub fn network(&self) -> NetworkType {
		match self {
			Self::Sepolia | Self::BscTestnet | Self::CoreDaoTestnet => NetworkType::Testnet,
			Self::Ethereum
			| Self::Bsc
			| Self::CoreDao
			| Self::Bsquared
			| Self::Bob
			| Self::Bitlayer
			| Self::Lorenzo
			| Self::Merlin
			| Self::AiLayer
			| Self::Mode
			| Self::XLayer
			| Self::Arbitrum
			| Self::Aurora
			| Self::Manta
			| Self::Linea
			| Self::Base => NetworkType::Mainnet,
		}
	}
}

/// Tagged chain identifier: one variant per family, crossed with network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainId {
	Bitcoin(NetworkType),
	Stacks(NetworkType),
	Evm(EvmChain),
	Brc20(NetworkType),
	Runes(NetworkType),
	Solana(NetworkType),
	Tron(NetworkType),
}

/// Chains that are no longer served. Any route naming one of these is
/// rejected before any other check runs.
pub const DEPRECATED_CHAINS: [ChainId; 2] =
	[ChainId::Evm(EvmChain::Lorenzo), ChainId::Evm(EvmChain::AiLayer)];

impl ChainId {
	/// The hub chain of a network.
	pub fn hub(network: NetworkType) -> Self {
		Self::Stacks(network)
	}

	/// The only chain of `family` on `network`; `None` for EVM, which has many.
	pub fn single(family: ChainFamily, network: NetworkType) -> Option<Self> {
		match family {
			ChainFamily::Bitcoin => Some(Self::Bitcoin(network)),
			ChainFamily::Stacks => Some(Self::Stacks(network)),
			ChainFamily::Evm => None,
			ChainFamily::Brc20 => Some(Self::Brc20(network)),
			ChainFamily::Runes => Some(Self::Runes(network)),
			ChainFamily::Solana => Some(Self::Solana(network)),
			ChainFamily::Tron => Some(Self::Tron(network)),
		}
	}

	pub fn family(&self) -> ChainFamily {
		match self {
			Self::Bitcoin(_) => ChainFamily::Bitcoin,
			Self::Stacks(_) => ChainFamily::Stacks,
			Self::Evm(_) => ChainFamily::Evm,
			Self::Brc20(_) => ChainFamily::Brc20,
			Self::Runes(_) => ChainFamily::Runes,
			Self::Solana(_) => ChainFamily::Solana,
			Self::Tron(_) => ChainFamily::Tron,
		}
	}

	pub fn network(&self) -> NetworkType {
		match self {
			Self::Evm(chain) => chain.network(),
			Self::Bitcoin(network)
			| Self::Stacks(network)
			| Self::Brc20(network)
			| Self::Runes(network)
			| Self::Solana(network)
			| Self::Tron(network) => *network,
		}
	}

	pub fn is_bitcoin(&self) -> bool {
		matches!(self, Self::Bitcoin(_))
	}

	pub fn is_stacks(&self) -> bool {
		matches!(self, Self::Stacks(_))
	}

	pub fn is_evm(&self) -> bool {
		matches!(self, Self::Evm(_))
	}

	pub fn is_brc20(&self) -> bool {
		matches!(self, Self::Brc20(_))
	}

	pub fn is_runes(&self) -> bool {
		matches!(self, Self::Runes(_))
	}

	pub fn is_solana(&self) -> bool {
		matches!(self, Self::Solana(_))
	}

	pub fn is_tron(&self) -> bool {
		matches!(self, Self::Tron(_))
	}

	pub fn is_hub(&self) -> bool {
		self.family().is_hub()
	}

	pub fn is_deprecated(&self) -> bool {
		DEPRECATED_CHAINS.contains(self)
	}

	/// Every chain of a network, deprecated ones included.
	pub fn all(network: NetworkType) -> Vec<ChainId> {
		let mut chains = vec![
			Self::Bitcoin(network),
			Self::Stacks(network),
			Self::Brc20(network),
			Self::Runes(network),
			Self::Solana(network),
			Self::Tron(network),
		];
		chains.extend(
			EvmChain::ALL
				.into_iter()
				.filter(|chain| chain.network() == network)
				.map(Self::Evm),
		);
		chains
	}

	/// Live (non-deprecated) spoke chains of a network.
	pub fn spokes(network: NetworkType) -> Vec<ChainId> {
		Self::all(network)
			.into_iter()
			.filter(|chain| !chain.is_hub() && !chain.is_deprecated())
			.collect()
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Evm(chain) => write!(f, "evm-{}", chain.slug()),
			Self::Bitcoin(network)
			| Self::Stacks(network)
			| Self::Brc20(network)
			| Self::Runes(network)
			| Self::Solana(network)
			| Self::Tron(network) => write!(f, "{}-{}", self.family(), network),
		}
	}
}

impl FromStr for ChainId {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (family, rest) = s
			.split_once('-')
			.ok_or_else(|| ParseIdError::new("chain id", s))?;
		let family: ChainFamily = family.parse().map_err(|_| ParseIdError::new("chain id", s))?;

		let network = || {
			rest.parse::<NetworkType>()
				.map_err(|_| ParseIdError::new("chain id", s))
		};
		match family {
			ChainFamily::Evm => EvmChain::from_slug(rest)
				.map(Self::Evm)
				.ok_or_else(|| ParseIdError::new("chain id", s)),
			ChainFamily::Bitcoin => Ok(Self::Bitcoin(network()?)),
			ChainFamily::Stacks => Ok(Self::Stacks(network()?)),
			ChainFamily::Brc20 => Ok(Self::Brc20(network()?)),
			ChainFamily::Runes => Ok(Self::Runes(network()?)),
			ChainFamily::Solana => Ok(Self::Solana(network()?)),
			ChainFamily::Tron => Ok(Self::Tron(network()?)),
		}
	}
}

impl Serialize for ChainId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for ChainId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

/// Failure to parse one of the canonical identifier strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseIdError {
	pub kind: &'static str,
	pub value: String,
}

impl ParseIdError {
	pub fn new(kind: &'static str, value: &str) -> Self {
		Self {
			kind,
			value: value.to_string(),
		}
	}
}
