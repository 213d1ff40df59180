//! Reducing and closing positions: withdraw, partial close and liquidate

mod common;

use common::*;
use ethereum_types::U256;
use lyf_amm::FeeSchedule;
use lyf_strategies::{
    ErrorClass, Liquidate, LiquidateParams, PartialCloseLiquidate, PartialCloseLiquidateParams,
    PartialCloseMinimizeTrading, PartialCloseMinimizeTradingParams, Strategy, StrategyError,
    StrategyEvent, StrategyParams, TokenAmount, WithdrawMinimizeTrading,
    WithdrawMinimizeTradingParams,
};

const WORKER_LP: u128 = 316_227_766_016_837_933;
const LIQUIDATED_BASE: u128 = 1_499_374_217_772_215_269;

fn withdraw(
    fx: &mut Fixture,
    handoff: &[TokenAmount],
    debt: U256,
    min_farming_token: U256,
) -> lyf_strategies::Result<()> {
    let data = WithdrawMinimizeTradingParams { min_farming_token }.encode();
    let worker = fx.worker;
    WithdrawMinimizeTrading::new(fx.core()).execute(&mut fx.venue, &worker, handoff, owner(), debt, &data)
}

#[test]
fn test_withdraw_without_swap_when_base_covers_debt() {
    let mut fx = Fixture::new(FeeSchedule::BPS_25);
    fx.provide(tokens(5, 1), tokens(5, 2));
    let lp = fx.worker_add(tokens(1, 0), tokens(1, 1));
    assert_eq!(lp, wei(316_227_766_016_837_932));
    let handoff = [fx.lp(lp)];

    withdraw(&mut fx, &handoff, tokens(1, 0), U256::zero()).unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), tokens(1, 0));
    assert_eq!(fx.balance(farming_token(), owner()), tokens(1, 1));
    assert!(fx.strategy_is_empty());
    assert_eq!(
        fx.venue.events(),
        &[StrategyEvent::WithdrawMinimizeTrading {
            strategy: strategy_address(),
            worker: worker_address(),
            tokens: fx.position_tokens(),
            owner: owner(),
            lp_burned: lp,
            farming_swapped: U256::zero(),
            base_to_worker: tokens(1, 0),
            farming_to_owner: tokens(1, 1),
        }]
    );
}

#[test]
fn test_withdraw_sells_only_the_deficit() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];

    withdraw(&mut fx, &handoff, tokens(12, 1), U256::zero()).unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), tokens(12, 1));
    assert_eq!(fx.balance(farming_token(), owner()), wei(74_937_343_358_395_989));
    assert!(fx.strategy_is_empty());
    assert!(matches!(
        fx.venue.events()[0],
        StrategyEvent::WithdrawMinimizeTrading { farming_swapped, .. }
            if farming_swapped == wei(25_062_656_641_604_011)
    ));
}

#[test]
fn test_withdraw_min_farming_token_enforced() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let before = fx.venue.clone();

    let err = withdraw(&mut fx, &handoff, tokens(12, 1), wei(74_937_343_358_395_990)).unwrap_err();

    assert_eq!(
        err,
        StrategyError::InsufficientFarmingTokenReceived {
            received: wei(74_937_343_358_395_989),
            minimum: wei(74_937_343_358_395_990),
        }
    );
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_withdraw_unpayable_debt_is_arithmetic_failure() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let before = fx.venue.clone();

    // Needs more farming token than the position holds
    let err = withdraw(&mut fx, &handoff, tokens(19, 1), U256::zero()).unwrap_err();
    assert!(matches!(err, StrategyError::ArithmeticUnderflow { .. }));
    assert_eq!(err.class(), ErrorClass::Arithmetic);
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());

    // Deficit beyond what the pool holds at any price
    let err = withdraw(&mut fx, &handoff, tokens(3, 0), U256::zero()).unwrap_err();
    assert_eq!(
        err,
        StrategyError::ArithmeticUnderflow {
            deficit: tokens(2, 0),
            farming_available: tokens(1, 1),
        }
    );
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_partial_close_liquidate_full_position() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let data = PartialCloseLiquidateParams {
        max_lp_to_liquidate: U256::MAX,
        max_debt_repayment: tokens(1, 0),
        min_base_token: wei(499_374_217_772_215_269),
    }
    .encode();
    let worker = fx.worker;

    PartialCloseLiquidate::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), wei(LIQUIDATED_BASE));
    assert_eq!(fx.balance(fx.pair, worker_address()), U256::zero());
    assert!(fx.strategy_is_empty());
    assert_eq!(
        fx.venue.events(),
        &[StrategyEvent::PartialCloseLiquidate {
            strategy: strategy_address(),
            worker: worker_address(),
            tokens: fx.position_tokens(),
            lp_liquidated: lp,
            debt_repaid: tokens(1, 0),
        }]
    );
}

#[test]
fn test_partial_close_liquidate_net_base_check() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let before = fx.venue.clone();
    let data = PartialCloseLiquidateParams {
        max_lp_to_liquidate: U256::MAX,
        max_debt_repayment: tokens(2, 0),
        min_base_token: wei(499_374_217_772_215_270),
    }
    .encode();
    let worker = fx.worker;

    // Repayment is capped at the debt, so the net is one wei short
    let err = PartialCloseLiquidate::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap_err();

    assert_eq!(
        err,
        StrategyError::InsufficientBaseTokenReceived {
            received: wei(LIQUIDATED_BASE),
            debt_repayment: tokens(1, 0),
            minimum: wei(499_374_217_772_215_270),
        }
    );
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_partial_close_liquidate_returns_unburned_lp() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let half = lp / 2;
    let data = PartialCloseLiquidateParams {
        max_lp_to_liquidate: half,
        max_debt_repayment: U256::zero(),
        min_base_token: U256::zero(),
    }
    .encode();
    let worker = fx.worker;

    PartialCloseLiquidate::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap();

    assert_eq!(fx.balance(fx.pair, worker_address()), lp - half);
    assert!(!fx.balance(base_token(), worker_address()).is_zero());
    assert_eq!(fx.balance(farming_token(), owner()), U256::zero());
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_liquidate_converts_everything_to_base() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let worker = fx.worker;
    let data = LiquidateParams {
        min_base_token: wei(LIQUIDATED_BASE),
    }
    .encode();

    Liquidate::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), wei(LIQUIDATED_BASE));
    assert_eq!(fx.balance(farming_token(), worker_address()), U256::zero());
    assert!(fx.strategy_is_empty());
    assert_eq!(
        fx.venue.events(),
        &[StrategyEvent::Liquidate {
            strategy: strategy_address(),
            worker: worker_address(),
            tokens: fx.position_tokens(),
            lp_burned: lp,
            base_to_worker: wei(LIQUIDATED_BASE),
        }]
    );
    assert_eq!(lp, wei(WORKER_LP));
}

#[test]
fn test_liquidate_min_base_enforced() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let before = fx.venue.clone();
    let worker = fx.worker;
    let data = LiquidateParams {
        min_base_token: wei(LIQUIDATED_BASE + 1),
    }
    .encode();

    let err = Liquidate::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Slippage);
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_partial_close_minimize_trading() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let half = lp / 2;
    assert_eq!(half, wei(158_113_883_008_418_966));
    let data = PartialCloseMinimizeTradingParams {
        max_lp_to_liquidate: half,
        max_debt_repayment: tokens(7, 1),
        min_farming_token: U256::zero(),
    }
    .encode();
    let worker = fx.worker;

    PartialCloseMinimizeTrading::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), tokens(7, 1));
    assert_eq!(fx.balance(fx.pair, worker_address()), wei(158_113_883_008_418_967));
    assert_eq!(fx.balance(farming_token(), owner()), wei(26_865_240_023_134_758));
    assert!(fx.strategy_is_empty());
    assert_eq!(
        fx.venue.events(),
        &[StrategyEvent::PartialCloseMinimizeTrading {
            strategy: strategy_address(),
            worker: worker_address(),
            tokens: fx.position_tokens(),
            owner: owner(),
            lp_liquidated: half,
            debt_repaid: tokens(7, 1),
            farming_swapped: wei(23_134_759_976_865_241),
            farming_to_owner: wei(26_865_240_023_134_758),
        }]
    );
}

#[test]
fn test_partial_close_minimize_min_farming_enforced() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp)];
    let before = fx.venue.clone();
    let data = PartialCloseMinimizeTradingParams {
        max_lp_to_liquidate: lp / 2,
        max_debt_repayment: tokens(7, 1),
        min_farming_token: wei(26_865_240_023_134_759),
    }
    .encode();
    let worker = fx.worker;

    let err = PartialCloseMinimizeTrading::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap_err();

    assert!(matches!(
        err,
        StrategyError::InsufficientFarmingTokenReceived { .. }
    ));
    assert_eq!(fx.venue, before);
    assert!(fx.strategy_is_empty());
}

#[test]
fn test_withdraw_counts_handed_base_toward_debt() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp), fx.fund_worker(base_token(), tokens(2, 1))];

    // Removal yields one base, the hand-off adds the other 0.2
    withdraw(&mut fx, &handoff, tokens(12, 1), U256::zero()).unwrap();

    assert_eq!(fx.balance(base_token(), worker_address()), tokens(12, 1));
    assert_eq!(fx.balance(farming_token(), owner()), tokens(1, 1));
    assert!(fx.strategy_is_empty());
    assert!(matches!(
        fx.venue.events()[0],
        StrategyEvent::WithdrawMinimizeTrading { farming_swapped, .. } if farming_swapped.is_zero()
    ));
}

#[test]
fn test_partial_close_minimize_counts_handed_base_toward_repayment() {
    let (mut fx, lp) = Fixture::with_worker_position();
    let handoff = [fx.lp(lp), fx.fund_worker(base_token(), tokens(3, 1))];
    let data = PartialCloseMinimizeTradingParams {
        max_lp_to_liquidate: lp / 2,
        max_debt_repayment: tokens(7, 1),
        min_farming_token: U256::zero(),
    }
    .encode();
    let worker = fx.worker;

    PartialCloseMinimizeTrading::new(fx.core())
        .execute(&mut fx.venue, &worker, &handoff, owner(), tokens(1, 0), &data)
        .unwrap();

    assert_eq!(
        fx.balance(base_token(), worker_address()),
        wei(499_999_999_999_999_998) + tokens(3, 1)
    );
    assert_eq!(fx.balance(farming_token(), owner()), wei(49_999_999_999_999_999));
    assert!(fx.strategy_is_empty());
    assert!(matches!(
        fx.venue.events()[0],
        StrategyEvent::PartialCloseMinimizeTrading { farming_swapped, .. } if farming_swapped.is_zero()
    ));
}
