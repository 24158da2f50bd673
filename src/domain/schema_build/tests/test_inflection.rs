use pretty_assertions::assert_eq;
use rstest::rstest;
use schema_build::{camel_case, upper_camel_case};

#[rstest]
#[case("id", "id")]
#[case("created_at", "createdAt")]
#[case("ledger_account_id", "ledgerAccountId")]
#[case("_private", "_private")]
#[case("amount", "amount")]
fn test_camel_case(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(expected, camel_case(input));
}

#[rstest]
#[case("posting_created", "PostingCreated")]
#[case("posting", "Posting")]
#[case("", "")]
fn test_upper_camel_case(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(expected, upper_camel_case(input));
}
