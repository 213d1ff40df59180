//! Shared fixture for strategy integration tests
//!
//! One base/farming pair on a fresh venue, a liquidity provider, a worker
//! allowed on a shared allow-list, and a position owner. Tokens the worker
//! hands to a strategy are minted to the worker first.

#![allow(dead_code)]

use ethereum_types::{Address, U256};
use lyf_amm::{FeeSchedule, PoolType};
use lyf_strategies::{
    CallerAllowList, PositionTokens, SharedAllowList, StrategyCore, StrategySettings, TokenAmount,
    Venue, WorkerHandle,
};

pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

pub fn wei(n: u128) -> U256 {
    U256::from(n)
}

/// `n / 10^decimals` whole tokens in wei
pub fn tokens(n: u64, decimals: u32) -> U256 {
    U256::from(n) * U256::exp10(18) / U256::exp10(decimals as usize)
}

pub fn base_token() -> Address {
    addr(0xba5e)
}

pub fn farming_token() -> Address {
    addr(0xfa4)
}

pub fn provider() -> Address {
    addr(0x100)
}

pub fn worker_address() -> Address {
    addr(0x200)
}

pub fn owner() -> Address {
    addr(0x300)
}

pub fn admin() -> Address {
    addr(0x400)
}

pub fn vault_address() -> Address {
    addr(0x500)
}

pub fn strategy_address() -> Address {
    addr(0x600)
}

pub struct Fixture {
    pub venue: Venue,
    pub gate: SharedAllowList,
    pub worker: WorkerHandle,
    pub pair: Address,
    pub settings: StrategySettings,
}

impl Fixture {
    /// Empty pair with `fee`; the worker is already allowed
    pub fn new(fee: FeeSchedule) -> Self {
        let mut venue = Venue::new();
        let pair = venue
            .create_pool(base_token(), farming_token(), fee, PoolType::PancakeSwapV2)
            .unwrap();
        Self::with_venue(venue, pair, StrategySettings::default())
    }

    /// Empty pair on `pool_type` at the fee `settings` give that DEX
    pub fn on_dex(pool_type: PoolType, settings: StrategySettings) -> Self {
        let mut venue = Venue::new();
        let pair = venue
            .create_dex_pool(base_token(), farming_token(), pool_type, &settings)
            .unwrap();
        Self::with_venue(venue, pair, settings)
    }

    fn with_venue(venue: Venue, pair: Address, settings: StrategySettings) -> Self {
        let gate = CallerAllowList::shared(admin());
        gate.write()
            .set_callers_ok(admin(), &[worker_address()], true)
            .unwrap();

        Self {
            venue,
            gate,
            worker: WorkerHandle {
                address: worker_address(),
                base_token: base_token(),
                farming_token: farming_token(),
            },
            pair,
            settings,
        }
    }

    /// Pair with fee 0.25% seeded 1 base : 0.1 farming by the provider, plus
    /// a worker position added at the same ratio and held by the worker
    pub fn with_worker_position() -> (Self, U256) {
        let mut fx = Self::new(FeeSchedule::BPS_25);
        fx.provide(tokens(1, 0), tokens(1, 1));
        let lp = fx.worker_add(tokens(1, 0), tokens(1, 1));
        (fx, lp)
    }

    pub fn core(&self) -> StrategyCore {
        StrategyCore::new(strategy_address(), self.gate.clone(), self.settings.clone())
    }

    pub fn position_tokens(&self) -> PositionTokens {
        PositionTokens {
            base_token: base_token(),
            farming_token: farming_token(),
            lp_token: self.pair,
        }
    }

    pub fn provide(&mut self, base: U256, farming: U256) -> U256 {
        self.add_as(provider(), base, farming)
    }

    /// Liquidity added by the worker itself, LP credited to the worker
    pub fn worker_add(&mut self, base: U256, farming: U256) -> U256 {
        self.add_as(worker_address(), base, farming)
    }

    /// Mint `amount` to the worker and describe it as a hand-off
    pub fn fund_worker(&mut self, token: Address, amount: U256) -> TokenAmount {
        self.venue.mint_tokens(token, worker_address(), amount).unwrap();
        TokenAmount::new(token, amount)
    }

    /// LP the worker already holds, as a hand-off
    pub fn lp(&self, amount: U256) -> TokenAmount {
        TokenAmount::new(self.pair, amount)
    }

    pub fn balance(&self, token: Address, holder: Address) -> U256 {
        self.venue.balance_of(token, holder)
    }

    pub fn strategy_is_empty(&self) -> bool {
        [base_token(), farming_token(), self.pair]
            .iter()
            .all(|token| self.balance(*token, strategy_address()).is_zero())
    }

    fn add_as(&mut self, who: Address, base: U256, farming: U256) -> U256 {
        self.venue.mint_tokens(base_token(), who, base).unwrap();
        self.venue.mint_tokens(farming_token(), who, farming).unwrap();
        let (_, _, lp) = self
            .venue
            .add_liquidity(
                who,
                base_token(),
                farming_token(),
                base,
                farming,
                U256::zero(),
                U256::zero(),
                who,
            )
            .unwrap();
        lp
    }
}
