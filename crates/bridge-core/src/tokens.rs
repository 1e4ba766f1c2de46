//! Address book token resolver.

use async_trait::async_trait;
use bridge_config::TokenAddressConfig;
use bridge_types::{ChainId, TokenId, TokenResolver};
use std::collections::HashMap;

/// In-memory mapping between token ids and chain-local addresses.
///
/// EVM addresses are matched case-insensitively; every other family keeps
/// its address casing.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
	by_address: HashMap<(ChainId, String), TokenId>,
	by_token: HashMap<(ChainId, TokenId), String>,
}

impl AddressBook {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_config(entries: &[TokenAddressConfig]) -> Self {
		entries.iter().fold(Self::new(), |book, entry| {
			book.with_entry(entry.chain, entry.token.clone(), entry.address.clone())
		})
	}

	pub fn with_entry(mut self, chain: ChainId, token: TokenId, address: impl Into<String>) -> Self {
		let address = address.into();
		self.by_address
			.insert((chain, normalize(&chain, &address)), token.clone());
		self.by_token.insert((chain, token), address);
		self
	}

	pub fn len(&self) -> usize {
		self.by_token.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_token.is_empty()
	}
}

fn normalize(chain: &ChainId, address: &str) -> String {
	if chain.is_evm() {
		address.to_lowercase()
	} else {
		address.to_string()
	}
}

#[async_trait]
impl TokenResolver for AddressBook {
	async fn token_from_address(&self, chain: &ChainId, address: &str) -> Option<TokenId> {
		self.by_address
			.get(&(*chain, normalize(chain, address)))
			.cloned()
	}

	async fn address_from_token(&self, chain: &ChainId, token: &TokenId) -> Option<String> {
		self.by_token.get(&(*chain, token.clone())).cloned()
	}
}
