use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coin, coins, from_json, Addr, Coin, MemoryStorage, OwnedDeps, Response, Uint128,
};
use cw_multi_test::{App, ContractWrapper, Executor};

use kite_component::contract::*;
use kite_component::error::ContractError;
use kite_component::msg::*;
use kite_component::state::{Config, SalePhase};

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const DENOM: &str = "ukite";
const PRICE: u128 = 10_000;
const WEEK: u64 = 604_800;

fn addr(deps: &TestDeps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

fn setup() -> TestDeps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let msg = InstantiateMsg {
        builder: deps.api.addr_make("builder").to_string(),
        fighter_contract: deps.api.addr_make("fighter").to_string(),
        uri: "ipfs://components/{id}.json".to_string(),
        name: "Kite Components".to_string(),
        denom: DENOM.to_string(),
        component_price: Uint128::new(PRICE),
        number_of_components: 4,
        trusted_forwarder: Some(deps.api.addr_make("forwarder").to_string()),
    };
    instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap();
    deps
}

fn run(
    deps: &mut TestDeps,
    sender: &Addr,
    funds: &[Coin],
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    execute(deps.as_mut(), mock_env(), message_info(sender, funds), msg)
}

fn as_owner(deps: &mut TestDeps, msg: ExecuteMsg) {
    let owner = addr(deps, "owner");
    run(deps, &owner, &[], msg).unwrap();
}

fn balance(deps: &TestDeps, owner: &Addr, component_id: u32) -> Uint128 {
    let res: BalanceResponse =
        from_json(query_balance(deps.as_ref(), owner.to_string(), component_id).unwrap()).unwrap();
    res.balance
}

fn phase(deps: &TestDeps) -> SalePhase {
    let config: Config = from_json(
        query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap(),
    )
    .unwrap();
    config.sale_phase
}

fn dapp_mint(to: &Addr, component_id: u32, amount: u128) -> ExecuteMsg {
    ExecuteMsg::DappMint {
        to: to.to_string(),
        component_id,
        amount: Uint128::new(amount),
    }
}

// ─── Instantiation & admin ──────────────────────────────────────────────────

#[test]
fn test_instantiate() {
    let deps = setup();
    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.owner, addr(&deps, "owner"));
    assert_eq!(config.builder, addr(&deps, "builder"));
    assert_eq!(config.fighter_contract, addr(&deps, "fighter"));
    assert_eq!(config.number_of_components, 4);
    assert_eq!(config.sale_phase, SalePhase::Paused);
}

#[test]
fn test_owner_only_setters() {
    let mut deps = setup();
    let outsider = addr(&deps, "outsider");
    let msgs = vec![
        ExecuteMsg::SetComponentPrice { price: Uint128::zero() },
        ExecuteMsg::SetNumberOfComponents { count: 100 },
        ExecuteMsg::SetUri { uri: "HACKED".to_string() },
        ExecuteMsg::SetName { name: "HACKED".to_string() },
        ExecuteMsg::SetBuilderContract { builder: outsider.to_string() },
        ExecuteMsg::SetFighterContract { fighter: outsider.to_string() },
        ExecuteMsg::SetTrustedForwarder { forwarder: None },
        ExecuteMsg::SetSalePhase { phase: SalePhase::PublicOpen },
        ExecuteMsg::FlipSaleState {},
        ExecuteMsg::EnablePublicMinting {},
        ExecuteMsg::DisablePublicMinting {},
    ];
    for msg in msgs {
        let err = run(&mut deps, &outsider, &[], msg).unwrap_err();
        assert_eq!(err, ContractError::NotOwner);
    }
}

#[test]
fn test_sale_state_setters() {
    let mut deps = setup();

    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});
    assert_eq!(phase(&deps), SalePhase::WhitelistOpen);
    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});
    assert_eq!(phase(&deps), SalePhase::Paused);

    as_owner(&mut deps, ExecuteMsg::EnablePublicMinting {});
    assert_eq!(phase(&deps), SalePhase::PublicOpen);
    as_owner(&mut deps, ExecuteMsg::DisablePublicMinting {});
    assert_eq!(phase(&deps), SalePhase::WhitelistOpen);

    as_owner(&mut deps, ExecuteMsg::SetSalePhase { phase: SalePhase::PublicOpen });
    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});
    assert_eq!(phase(&deps), SalePhase::Paused);
}

#[test]
fn test_disable_public_minting_never_opens_sale() {
    let mut deps = setup();
    let owner = addr(&deps, "owner");
    let user = addr(&deps, "user");

    as_owner(&mut deps, ExecuteMsg::DisablePublicMinting {});
    assert_eq!(phase(&deps), SalePhase::Paused);
    let err = run(&mut deps, &owner, &[], dapp_mint(&user, 0, 1)).unwrap_err();
    assert_eq!(err, ContractError::SaleNotActive);

    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});
    as_owner(&mut deps, ExecuteMsg::DisablePublicMinting {});
    assert_eq!(phase(&deps), SalePhase::WhitelistOpen);
}

#[test]
fn test_instantiate_rejects_empty_denom() {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let msg = InstantiateMsg {
        builder: deps.api.addr_make("builder").to_string(),
        fighter_contract: deps.api.addr_make("fighter").to_string(),
        uri: "ipfs://components/{id}.json".to_string(),
        name: "Kite Components".to_string(),
        denom: String::new(),
        component_price: Uint128::new(PRICE),
        number_of_components: 4,
        trusted_forwarder: None,
    };
    let err = instantiate(deps.as_mut(), mock_env(), message_info(&owner, &[]), msg).unwrap_err();
    assert!(matches!(err, ContractError::InvalidConfig { .. }));
}

// ─── Dapp mint ──────────────────────────────────────────────────────────────

#[test]
fn test_dapp_mint_authorization_and_phase() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let owner = addr(&deps, "owner");
    let user = addr(&deps, "user");

    let err = run(&mut deps, &user, &[], dapp_mint(&user, 0, 1)).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized);

    let err = run(&mut deps, &builder, &[], dapp_mint(&user, 0, 1)).unwrap_err();
    assert_eq!(err, ContractError::SaleNotActive);

    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});

    let err = run(&mut deps, &builder, &[], dapp_mint(&user, 0, 0)).unwrap_err();
    assert_eq!(err, ContractError::InvalidAmount);

    let err = run(&mut deps, &builder, &[], dapp_mint(&user, 4, 1)).unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidComponent {
            component_id: 4,
            max: 4,
        }
    );

    run(&mut deps, &builder, &[], dapp_mint(&user, 0, 2)).unwrap();
    run(&mut deps, &owner, &[], dapp_mint(&user, 0, 1)).unwrap();
    run(&mut deps, &owner, &[], dapp_mint(&user, 3, 5)).unwrap();
    assert_eq!(balance(&deps, &user, 0), Uint128::new(3));
    assert_eq!(balance(&deps, &user, 3), Uint128::new(5));
    assert_eq!(balance(&deps, &user, 1), Uint128::zero());
}

#[test]
fn test_dapp_mint_rejects_funds() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let user = addr(&deps, "user");
    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});

    let err = run(&mut deps, &builder, &coins(1, DENOM), dapp_mint(&user, 0, 1)).unwrap_err();
    assert_eq!(err, ContractError::UnexpectedFunds);
}

// ─── Burn batch ─────────────────────────────────────────────────────────────

fn burn(from: &Addr, ids: Vec<u32>, amounts: Vec<u128>) -> ExecuteMsg {
    ExecuteMsg::BurnBatch {
        from: from.to_string(),
        component_ids: ids,
        amounts: amounts.into_iter().map(Uint128::new).collect(),
    }
}

fn funded_user(deps: &mut TestDeps) -> Addr {
    let builder = addr(deps, "builder");
    let user = addr(deps, "user");
    as_owner(deps, ExecuteMsg::FlipSaleState {});
    for id in 0..4 {
        run(deps, &builder, &[], dapp_mint(&user, id, 2)).unwrap();
    }
    user
}

#[test]
fn test_burn_batch() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let user = funded_user(&mut deps);

    let res = run(&mut deps, &builder, &[], burn(&user, vec![0, 1, 2, 3], vec![1, 1, 1, 2]))
        .unwrap();
    assert_eq!(res.attributes[0].value, "burn_batch");
    assert_eq!(balance(&deps, &user, 0), Uint128::one());
    assert_eq!(balance(&deps, &user, 1), Uint128::one());
    assert_eq!(balance(&deps, &user, 2), Uint128::one());
    assert_eq!(balance(&deps, &user, 3), Uint128::zero());
}

#[test]
fn test_burn_batch_is_all_or_nothing() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let user = funded_user(&mut deps);

    let err = run(&mut deps, &builder, &[], burn(&user, vec![0, 1, 2], vec![1, 1, 3]))
        .unwrap_err();
    assert!(matches!(err, ContractError::BurnBatchFailed { .. }));
    for id in 0..4 {
        assert_eq!(balance(&deps, &user, id), Uint128::new(2));
    }

    // Duplicated ids are summed before checking
    let err = run(&mut deps, &builder, &[], burn(&user, vec![1, 1, 1], vec![1, 1, 1]))
        .unwrap_err();
    assert!(matches!(err, ContractError::BurnBatchFailed { .. }));
    assert_eq!(balance(&deps, &user, 1), Uint128::new(2));

    run(&mut deps, &builder, &[], burn(&user, vec![1, 1], vec![1, 1])).unwrap();
    assert_eq!(balance(&deps, &user, 1), Uint128::zero());
}

#[test]
fn test_burn_batch_validation() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let user = funded_user(&mut deps);

    let err = run(&mut deps, &user, &[], burn(&user, vec![0], vec![1])).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized);

    let err = run(&mut deps, &builder, &[], burn(&user, vec![], vec![])).unwrap_err();
    assert_eq!(err, ContractError::EmptyBatch);

    let err = run(&mut deps, &builder, &[], burn(&user, vec![0, 1], vec![1])).unwrap_err();
    assert_eq!(err, ContractError::LengthMismatch);

    let err = run(&mut deps, &builder, &[], burn(&user, vec![9], vec![1])).unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidComponent {
            component_id: 9,
            max: 4,
        }
    );
}

// ─── Relay ──────────────────────────────────────────────────────────────────

#[test]
fn test_relay_uses_signer_identity() {
    let mut deps = setup();
    let forwarder = addr(&deps, "forwarder");
    let builder = addr(&deps, "builder");
    let user = addr(&deps, "user");
    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});

    let relayed = |signer: &Addr| ExecuteMsg::Relay {
        signer: signer.to_string(),
        msg: Box::new(dapp_mint(&user, 2, 1)),
    };

    let err = run(&mut deps, &builder, &[], relayed(&builder)).unwrap_err();
    assert_eq!(err, ContractError::NotTrustedForwarder);

    let err = run(&mut deps, &forwarder, &[], relayed(&user)).unwrap_err();
    assert_eq!(err, ContractError::Unauthorized);

    run(&mut deps, &forwarder, &[], relayed(&builder)).unwrap();
    assert_eq!(balance(&deps, &user, 2), Uint128::one());
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[test]
fn test_balance_of_batch_and_uri() {
    let mut deps = setup();
    let builder = addr(&deps, "builder");
    let alice = addr(&deps, "alice");
    let bob = addr(&deps, "bob");
    as_owner(&mut deps, ExecuteMsg::FlipSaleState {});
    run(&mut deps, &builder, &[], dapp_mint(&alice, 0, 3)).unwrap();
    run(&mut deps, &builder, &[], dapp_mint(&bob, 1, 7)).unwrap();

    let res: BalanceOfBatchResponse = from_json(
        query_balance_of_batch(
            deps.as_ref(),
            vec![alice.to_string(), bob.to_string(), bob.to_string()],
            vec![0, 1, 0],
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(
        res.balances,
        vec![Uint128::new(3), Uint128::new(7), Uint128::zero()]
    );

    assert!(query_balance_of_batch(deps.as_ref(), vec![alice.to_string()], vec![0, 1]).is_err());

    let uri: UriResponse = from_json(query_uri(deps.as_ref(), 1).unwrap()).unwrap();
    assert_eq!(uri.uri, "ipfs://components/{id}.json");
    assert!(query_uri(deps.as_ref(), 4).is_err());
}

// ─── Public mint against a live fighter contract ────────────────────────────

struct Suite {
    app: App,
    fighter: Addr,
    component: Addr,
    owner: Addr,
    holder: Addr,
    stranger: Addr,
}

fn suite() -> Suite {
    let mut app = App::default();
    let owner = app.api().addr_make("owner");
    let holder = app.api().addr_make("holder");
    let stranger = app.api().addr_make("stranger");
    let builder = app.api().addr_make("builder");

    app.init_modules(|router, _api, storage| {
        for who in [&holder, &stranger] {
            router
                .bank
                .init_balance(storage, who, coins(1_000_000, DENOM))
                .unwrap();
        }
    });

    let fighter_code = app.store_code(Box::new(ContractWrapper::new(
        kite_fighter::contract::execute,
        kite_fighter::contract::instantiate,
        kite_fighter::contract::query,
    )));
    let component_code = app.store_code(Box::new(ContractWrapper::new(execute, instantiate, query)));

    let fighter = app
        .instantiate_contract(
            fighter_code,
            owner.clone(),
            &kite_fighter::msg::InstantiateMsg {
                builder: builder.to_string(),
                name: "Kite".to_string(),
                symbol: "KITE".to_string(),
                denom: DENOM.to_string(),
                cost: Uint128::new(PRICE),
                max_mint_amount: 2,
                max_mint_amount_free: 2,
                max_supply: 5555,
                max_mint_amount_public: 2,
                hidden_metadata_uri: "ipfs://hidden/".to_string(),
                trusted_forwarder: None,
            },
            &[],
            "fighter",
            None,
        )
        .unwrap();

    let component = app
        .instantiate_contract(
            component_code,
            owner.clone(),
            &InstantiateMsg {
                builder: builder.to_string(),
                fighter_contract: fighter.to_string(),
                uri: "ipfs://components/{id}.json".to_string(),
                name: "Kite Components".to_string(),
                denom: DENOM.to_string(),
                component_price: Uint128::new(PRICE),
                number_of_components: 4,
                trusted_forwarder: None,
            },
            &[],
            "component",
            None,
        )
        .unwrap();

    // Holder buys one fighter in the public sale
    app.execute_contract(
        owner.clone(),
        fighter.clone(),
        &kite_fighter::msg::ExecuteMsg::SetPaused { paused: false },
        &[],
    )
    .unwrap();
    app.execute_contract(
        holder.clone(),
        fighter.clone(),
        &kite_fighter::msg::ExecuteMsg::Mint { amount: 1 },
        &coins(PRICE, DENOM),
    )
    .unwrap();

    Suite {
        app,
        fighter,
        component,
        owner,
        holder,
        stranger,
    }
}

impl Suite {
    fn public_mint(&mut self, sender: &Addr, component_id: u32, paid: u128) -> Result<(), String> {
        self.app
            .execute_contract(
                sender.clone(),
                self.component.clone(),
                &ExecuteMsg::PublicMint { component_id },
                &coins(paid, DENOM),
            )
            .map(|_| ())
            .map_err(|e| e.root_cause().to_string())
    }

    fn set_phase(&mut self, phase: SalePhase) {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.component.clone(),
                &ExecuteMsg::SetSalePhase { phase },
                &[],
            )
            .unwrap();
    }

    fn balance(&self, owner: &Addr, component_id: u32) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.component,
                &QueryMsg::Balance {
                    owner: owner.to_string(),
                    component_id,
                },
            )
            .unwrap();
        res.balance
    }

    fn advance(&mut self, seconds: u64) {
        self.app.update_block(|b| {
            b.time = b.time.plus_seconds(seconds);
            b.height += 1;
        });
    }
}

#[test]
fn test_public_mint_requires_public_phase() {
    let mut s = suite();
    let holder = s.holder.clone();

    let err = s.public_mint(&holder, 0, PRICE).unwrap_err();
    assert_eq!(err, "public sale must be active to mint");

    s.set_phase(SalePhase::WhitelistOpen);
    let err = s.public_mint(&holder, 0, PRICE).unwrap_err();
    assert_eq!(err, "public sale must be active to mint");
}

#[test]
fn test_public_mint_requires_fighter_and_payment() {
    let mut s = suite();
    let holder = s.holder.clone();
    let stranger = s.stranger.clone();
    s.set_phase(SalePhase::PublicOpen);

    let err = s.public_mint(&stranger, 0, PRICE).unwrap_err();
    assert_eq!(err, "address must own a kite fighter");

    let err = s.public_mint(&holder, 0, PRICE - 1).unwrap_err();
    assert_eq!(
        err,
        format!("insufficient funds: required {}, sent {}", PRICE, PRICE - 1)
    );

    // Overpayment is kept by the contract
    s.public_mint(&holder, 0, PRICE * 2).unwrap();
    assert_eq!(s.balance(&holder, 0), Uint128::one());
    let held = s
        .app
        .wrap()
        .query_balance(&s.component, DENOM)
        .unwrap();
    assert_eq!(held, coin(PRICE * 2, DENOM));
}

#[test]
fn test_public_mint_once_per_week() {
    let mut s = suite();
    let holder = s.holder.clone();
    s.set_phase(SalePhase::PublicOpen);

    s.public_mint(&holder, 1, PRICE).unwrap();

    let err = s.public_mint(&holder, 2, PRICE).unwrap_err();
    assert_eq!(err, "address already minted a component this week");

    s.advance(3_600);
    let err = s.public_mint(&holder, 2, PRICE).unwrap_err();
    assert_eq!(err, "address already minted a component this week");

    s.advance(WEEK);
    s.public_mint(&holder, 2, PRICE).unwrap();
    assert_eq!(s.balance(&holder, 1), Uint128::one());
    assert_eq!(s.balance(&holder, 2), Uint128::one());

    let week: LastPublicMintWeekResponse = s
        .app
        .wrap()
        .query_wasm_smart(
            &s.component,
            &QueryMsg::LastPublicMintWeek {
                address: holder.to_string(),
            },
        )
        .unwrap();
    let now = s.app.block_info().time.seconds();
    assert_eq!(week.week, Some(now / WEEK));
}

#[test]
fn test_selling_the_fighter_revokes_public_mint() {
    let mut s = suite();
    let holder = s.holder.clone();
    let stranger = s.stranger.clone();
    s.set_phase(SalePhase::PublicOpen);

    s.app
        .execute_contract(
            holder.clone(),
            s.fighter.clone(),
            &kite_fighter::msg::ExecuteMsg::TransferNft {
                recipient: stranger.to_string(),
                token_id: 1,
            },
            &[],
        )
        .unwrap();

    let err = s.public_mint(&holder, 0, PRICE).unwrap_err();
    assert_eq!(err, "address must own a kite fighter");
    s.public_mint(&stranger, 0, PRICE).unwrap();
}
