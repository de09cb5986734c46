mod test_quotes;

// Tests breakdown
// --------------------
// test_utils.rs: in-memory chain reader and shared fixtures
// test_quotes.rs: direct / two-hop quoting, pair resolution, failure handling
// test_swap.rs: swap planning, slippage and approvals
// test_tokens.rs: token registry, persistence and discovery reads
