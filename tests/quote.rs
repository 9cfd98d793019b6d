use serde_json::json;
use srm_dex_sdk::{
    call::{CallArgument, PureValue},
    client::SimulationResult,
    error::{ClientError, DexError},
    query::Dex,
    testing::{self, MockClient},
    types::{Address, QuoteKind, QuoteParams},
};

fn params() -> QuoteParams {
    QuoteParams {
        is_a_to_b: true,
        pool_balance_a: 1_000_000,
        pool_balance_b: 2_000_000,
        swap_fee: 30,
        lp_builder_fee: 10,
        burn_fee: 5,
        dev_royalty_fee: 3,
        rewards_fee: 2,
    }
}

fn sender() -> Address {
    testing::object_id(0xee)
}

/// Tests that a sell quote is requested with the declared argument order
/// and decoded field by field.
#[tokio::test]
async fn test_quote_by_sell() {
    let client = MockClient::new().with_row("get_swap_quote_by_sell", json!([1000, 5, 3, 2, 1, 1, 1]));
    let dex = Dex::new(&testing::deployment(), client, sender());

    let quote = dex.quote_by_sell(5_000, &params()).await.unwrap();
    assert_eq!(quote.kind, QuoteKind::BySell);
    assert_eq!(quote.amount_out(), Some(1000));
    assert_eq!(quote.lp_builder_fee_in, 5);
    assert_eq!(quote.lp_builder_fee_out, 3);
    assert_eq!(quote.swap_fee, 2);
    assert_eq!(quote.burn_fee, 1);
    assert_eq!(quote.dev_fee, 1);
    assert_eq!(quote.rewards_fee, 1);
    assert_eq!(quote.total_fees(), 13);

    let calls = dex.client().simulated();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sender, sender());
    let descriptor = &calls[0].descriptor;
    assert_eq!(descriptor.target().module().as_str(), "quote");
    assert!(descriptor.type_params().is_empty());
    let values = descriptor
        .arguments()
        .iter()
        .map(|arg| match arg {
            CallArgument::Pure(p) => p.value().clone(),
            other => panic!("unexpected argument {other:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        values,
        vec![
            PureValue::U64(5_000),
            PureValue::Bool(true),
            PureValue::U64(1_000_000),
            PureValue::U64(2_000_000),
            PureValue::U64(30),
            PureValue::U64(10),
            PureValue::U64(5),
            PureValue::U64(3),
            PureValue::U64(2),
        ]
    );
}

/// Tests that a buy quote reuses the layout and labels the lead amount as the input.
#[tokio::test]
async fn test_quote_by_buy() {
    let client = MockClient::new().with_row(
        "get_swap_quote_by_buy",
        json!(["9007199254740993", "7", "6", "5", "4", "3", "2"]),
    );
    let dex = Dex::new(&testing::deployment(), client, sender());

    let quote = dex.quote_by_buy(100, &params()).await.unwrap();
    assert_eq!(quote.kind, QuoteKind::ByBuy);
    assert_eq!(quote.final_amount_in(), Some(9_007_199_254_740_993));
    assert_eq!(quote.amount_out(), None);
    assert_eq!(quote.rewards_fee, 2);

    let calls = dex.client().simulated();
    assert_eq!(
        calls[0].descriptor.target().function().as_str(),
        "get_swap_quote_by_buy"
    );
}

#[tokio::test]
async fn test_quote_malformed_result() {
    let client = MockClient::new()
        .with_row("get_swap_quote_by_sell", json!([1000, 5, 3]))
        .with_simulation("get_swap_quote_by_buy", SimulationResult::default());
    let dex = Dex::new(&testing::deployment(), client, sender());

    let err = dex.quote_by_sell(1, &params()).await.unwrap_err();
    assert_eq!(err.operation(), Some("get_swap_quote_by_sell"));

    let err = dex.quote_by_buy(1, &params()).await.unwrap_err();
    assert!(matches!(
        err,
        DexError::MalformedResult { operation: "get_swap_quote_by_buy", .. }
    ));
}

#[tokio::test]
async fn test_quote_execution_failure() {
    let client = MockClient::new().with_simulation(
        "get_swap_quote_by_sell",
        SimulationResult::aborted("MoveAbort(quote, 3)"),
    );
    let dex = Dex::new(&testing::deployment(), client, sender());

    let err = dex.quote_by_sell(1, &params()).await.unwrap_err();
    assert!(matches!(err, DexError::ExecutionFailed(ref msg) if msg.contains("MoveAbort")));
}

#[tokio::test]
async fn test_quote_client_error_is_propagated() {
    let client = MockClient::new().fail("get_swap_quote_by_sell", ClientError::Timeout);
    let dex = Dex::new(&testing::deployment(), client, sender());

    let err = dex.quote_by_sell(1, &params()).await.unwrap_err();
    assert!(matches!(err, DexError::Client(ClientError::Timeout)));
    assert_eq!(dex.client().simulated().len(), 1);
}
