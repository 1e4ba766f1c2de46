//! Collaborator mocks and a mainnet fixture shared by the unit tests.

use crate::context::BridgeContext;
use crate::graph::DeclaredRouteGraph;
use crate::tokens::AddressBook;
use async_trait::async_trait;
use bridge_types::{
	ChainFamily, ChainId, Decimal, EvmChain, HopDirection, NetworkType, OnChainHopConfig, OnChainReader,
	ProviderError, ProviderResult, RouteProvider, RouteRow, RowFeeParams, RowGasFee,
	SpecialFeeDetails, SwapRoute, SwapVenue, TokenId,
};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MockRouteProvider {
	rows: Mutex<HashMap<ChainId, Vec<RouteRow>>>,
	calls: Mutex<HashMap<(ChainFamily, NetworkType), usize>>,
	failure: Mutex<Option<ProviderError>>,
}

impl MockRouteProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_rows(self, chain: ChainId, rows: Vec<RouteRow>) -> Self {
		self.rows.lock().unwrap().insert(chain, rows);
		self
	}

	pub fn fail_with(&self, error: ProviderError) {
		*self.failure.lock().unwrap() = Some(error);
	}

	pub fn clear_failure(&self) {
		*self.failure.lock().unwrap() = None;
	}

	pub fn calls(&self) -> usize {
		self.calls.lock().unwrap().values().sum()
	}

	pub fn calls_for(&self, family: ChainFamily, network: NetworkType) -> usize {
		self.calls
			.lock()
			.unwrap()
			.get(&(family, network))
			.copied()
			.unwrap_or(0)
	}
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
	async fn supported_routes(&self, family: ChainFamily, network: NetworkType) -> ProviderResult<Vec<RouteRow>> {
		*self.calls.lock().unwrap().entry((family, network)).or_insert(0) += 1;
		if let Some(error) = self.failure.lock().unwrap().clone() {
			return Err(error);
		}
		Ok(self
			.rows
			.lock()
			.unwrap()
			.iter()
			.filter(|(chain, _)| chain.family() == family && chain.network() == network)
			.flat_map(|(_, rows)| rows.iter().cloned())
			.collect())
	}
}

type HopKey = (ChainId, String, HopDirection);

#[derive(Default)]
pub struct MockOnChainReader {
	configs: Mutex<HashMap<HopKey, OnChainHopConfig>>,
	special: Mutex<HashMap<String, SpecialFeeDetails>>,
	rates: Mutex<HashMap<String, Decimal>>,
	failure: Mutex<Option<ProviderError>>,
	delay: Mutex<Option<Duration>>,
	hop_reads: AtomicUsize,
	special_reads: AtomicUsize,
}

impl MockOnChainReader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(self, chain: ChainId, address: &str, direction: HopDirection, config: OnChainHopConfig) -> Self {
		self.configs
			.lock()
			.unwrap()
			.insert((chain, address.to_string(), direction), config);
		self
	}

	pub fn set_special_fee_details(&self, swap: &SwapRoute, details: SpecialFeeDetails) {
		self.special
			.lock()
			.unwrap()
			.insert(swap.discriminant(), details);
	}

	pub fn set_exchange_rate(&self, swap: &SwapRoute, rate: Decimal) {
		self.rates.lock().unwrap().insert(swap.discriminant(), rate);
	}

	pub fn set_delay(&self, delay: Duration) {
		*self.delay.lock().unwrap() = Some(delay);
	}

	pub fn fail_with(&self, error: ProviderError) {
		*self.failure.lock().unwrap() = Some(error);
	}

	pub fn clear_failure(&self) {
		*self.failure.lock().unwrap() = None;
	}

	pub fn hop_reads(&self) -> usize {
		self.hop_reads.load(Ordering::SeqCst)
	}

	pub fn special_fee_reads(&self) -> usize {
		self.special_reads.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl OnChainReader for MockOnChainReader {
	async fn read_hop_config(
		&self,
		chain: &ChainId,
		token_address: &str,
		direction: HopDirection,
	) -> ProviderResult<Option<OnChainHopConfig>> {
		self.hop_reads.fetch_add(1, Ordering::SeqCst);
		let delay = *self.delay.lock().unwrap();
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}
		if let Some(error) = self.failure.lock().unwrap().clone() {
			return Err(error);
		}
		Ok(self
			.configs
			.lock()
			.unwrap()
			.get(&(*chain, token_address.to_string(), direction))
			.cloned())
	}

	async fn read_special_fee_details(
		&self,
		swap: &SwapRoute,
		_to_chain: &ChainId,
		_to_token: &TokenId,
	) -> ProviderResult<Option<SpecialFeeDetails>> {
		self.special_reads.fetch_add(1, Ordering::SeqCst);
		Ok(self.special.lock().unwrap().get(&swap.discriminant()).cloned())
	}

	async fn read_swap_exchange_rate(&self, swap: &SwapRoute) -> ProviderResult<Decimal> {
		Ok(self
			.rates
			.lock()
			.unwrap()
			.get(&swap.discriminant())
			.copied()
			.unwrap_or(Decimal::ONE))
	}
}

pub struct Fixture {
	pub ctx: BridgeContext,
	pub provider: Arc<MockRouteProvider>,
	pub reader: Arc<MockOnChainReader>,
}

pub fn instant_swap(from_hub_symbol: &str, to_hub_symbol: &str) -> SwapRoute {
	SwapRoute {
		via: SwapVenue::InstantSwap,
		from_token: TokenId::Stacks(from_hub_symbol.to_string()),
		to_token: TokenId::Stacks(to_hub_symbol.to_string()),
		pools: Vec::new(),
	}
}

pub fn fixture() -> Fixture {
	fixture_with_graph(DeclaredRouteGraph::builtin())
}

pub fn fixture_with_graph(graph: DeclaredRouteGraph) -> Fixture {
	let provider = Arc::new(mainnet_provider());
	let reader = Arc::new(mainnet_reader());
	let ctx = BridgeContext::builder()
		.with_route_provider(provider.clone())
		.with_on_chain_reader(reader.clone())
		.with_token_resolver(Arc::new(mainnet_address_book()))
		.with_declared_routes(graph)
		.build()
		.unwrap();
	Fixture { ctx, provider, reader }
}

const HUB_ABTC: &str = "SP000.token-abtc";
const HUB_SUSDT: &str = "SP000.token-susdt";
const HUB_SSOL: &str = "SP000.token-ssol";
const HUB_SDOG: &str = "SP000.runes-dog";
const HUB_SORDI: &str = "SP000.brc20-ordi";
const HUB_STX: &str = "SP000.token-wstx";

fn hub() -> ChainId {
	ChainId::hub(NetworkType::Mainnet)
}

fn mainnet_address_book() -> AddressBook {
	let bsc = ChainId::Evm(EvmChain::Bsc);
	AddressBook::new()
		.with_entry(hub(), TokenId::hub_btc(), HUB_ABTC)
		.with_entry(hub(), TokenId::Stacks("sUSDT".into()), HUB_SUSDT)
		.with_entry(hub(), TokenId::Stacks("sSOL".into()), HUB_SSOL)
		.with_entry(hub(), TokenId::Stacks("sDOG".into()), HUB_SDOG)
		.with_entry(hub(), TokenId::Stacks("sORDI".into()), HUB_SORDI)
		.with_entry(hub(), TokenId::Stacks("STX".into()), HUB_STX)
		.with_entry(bsc, TokenId::Evm("USDT".into()), "0xusdt")
		.with_entry(bsc, TokenId::Evm("BTCB".into()), "0xbtcb")
		.with_entry(bsc, TokenId::Evm("SKIBIDI".into()), "0xskibidi")
		.with_entry(ChainId::Runes(NetworkType::Mainnet), TokenId::Runes("DOG".into()), "840000:3")
		.with_entry(ChainId::Brc20(NetworkType::Mainnet), TokenId::Brc20("ordi".into()), "ordi")
		.with_entry(ChainId::Solana(NetworkType::Mainnet), TokenId::Solana("SOL".into()), "So111")
		.with_entry(ChainId::Solana(NetworkType::Mainnet), TokenId::Solana("USDT".into()), "Es9vMF")
		.with_entry(ChainId::Tron(NetworkType::Mainnet), TokenId::Tron("USDT".into()), "TR7NHq")
}

fn fee(rate: Decimal, min_fee: Decimal) -> RowFeeParams {
	RowFeeParams {
		paused: false,
		fee_rate: rate,
		min_fee_amount: min_fee,
		min_amount: None,
		max_amount: None,
	}
}

fn row(chain: ChainId, paired: &str, hub_token: &str, peg_in: RowFeeParams, peg_out: RowFeeParams) -> RouteRow {
	RouteRow {
		chain,
		paired_token_address: paired.to_string(),
		hub_token_address: hub_token.to_string(),
		peg_in,
		peg_out,
		peg_out_gas_fee: None,
	}
}

fn mainnet_provider() -> MockRouteProvider {
	let bsc = ChainId::Evm(EvmChain::Bsc);
	let runes = ChainId::Runes(NetworkType::Mainnet);
	let brc20 = ChainId::Brc20(NetworkType::Mainnet);
	let solana = ChainId::Solana(NetworkType::Mainnet);
	let tron = ChainId::Tron(NetworkType::Mainnet);

	let zero = || fee(Decimal::ZERO, Decimal::ZERO);

	let mut dog = row(runes, "840000:3", HUB_SDOG, zero(), fee(dec!(0.01), dec!(1)));
	dog.peg_out_gas_fee = Some(RowGasFee {
		token_address: HUB_STX.to_string(),
		amount: dec!(2),
	});

	let mut ordi_out = fee(dec!(0.002), dec!(0.5));
	ordi_out.paused = true;

	MockRouteProvider::new()
		.with_rows(
			bsc,
			vec![
				row(bsc, "0xusdt", HUB_SUSDT, zero(), zero()),
				row(bsc, "0xbtcb", HUB_ABTC, zero(), zero()),
				row(bsc, "0xskibidi", HUB_SUSDT, zero(), zero()),
			],
		)
		.with_rows(runes, vec![dog])
		.with_rows(
			brc20,
			vec![row(brc20, "ordi", HUB_SORDI, fee(dec!(0.002), dec!(0.5)), ordi_out)],
		)
		.with_rows(
			solana,
			vec![
				row(solana, "So111", HUB_SSOL, zero(), fee(dec!(0.001), dec!(0.5))),
				row(solana, "Es9vMF", HUB_SUSDT, zero(), fee(dec!(0.001), dec!(1))),
			],
		)
		.with_rows(
			tron,
			vec![
				row(tron, "TR7NHq", HUB_SUSDT, fee(dec!(0.001), dec!(1)), fee(dec!(0.001), dec!(2))),
				row(tron, "Tunknown", HUB_SUSDT, zero(), zero()),
			],
		)
}

fn mainnet_reader() -> MockOnChainReader {
	let bsc = ChainId::Evm(EvmChain::Bsc);
	let abtc = |gas_fee| OnChainHopConfig {
		is_paused: false,
		fee_rate: dec!(0.001),
		min_fee: dec!(0.0001),
		min_amount: None,
		max_amount: None,
		gas_fee,
	};
	let usdt = OnChainHopConfig {
		is_paused: false,
		fee_rate: dec!(0.003),
		min_fee: dec!(1),
		min_amount: Some(dec!(5)),
		max_amount: Some(dec!(100000)),
		gas_fee: None,
	};

	MockOnChainReader::new()
		.with_config(hub(), HUB_ABTC, HopDirection::PegIn, abtc(Some(dec!(0.00001))))
		.with_config(hub(), HUB_ABTC, HopDirection::PegOut, abtc(Some(dec!(0.00002))))
		.with_config(bsc, "0xusdt", HopDirection::PegIn, usdt.clone())
		.with_config(bsc, "0xusdt", HopDirection::PegOut, usdt)
}
