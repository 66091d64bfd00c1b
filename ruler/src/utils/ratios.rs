use num_integer::div_floor;

pub const DECIMAL_BASE: u128 = 100_000_000;

/// How many rTokens a collateral deposit mints. `mint_ratio` is a base-1e8
/// fraction; the result is scaled into the paired token's decimals. Floor
/// division throughout: the rounding loss always stays with the pool.
pub fn rtoken_amount_from_col(
    col_amount: u128,
    col_decimals: u32,
    paired_decimals: u32,
    mint_ratio: u128,
) -> u128 {
    if paired_decimals >= col_decimals {
        let scale: u128 = 10u128.pow(paired_decimals - col_decimals);
        div_floor(col_amount * mint_ratio * scale, DECIMAL_BASE)
    } else {
        let scale: u128 = 10u128.pow(col_decimals - paired_decimals);
        div_floor(col_amount * mint_ratio, DECIMAL_BASE * scale)
    }
}

/// Inverse direction: the collateral value of an rToken amount, scaled into
/// the collateral token's decimals. Also floors.
pub fn col_amount_from_rtoken(
    rtoken_amount: u128,
    col_decimals: u32,
    rtoken_decimals: u32,
    mint_ratio: u128,
) -> u128 {
    if col_decimals >= rtoken_decimals {
        let scale: u128 = 10u128.pow(col_decimals - rtoken_decimals);
        div_floor(rtoken_amount * scale * DECIMAL_BASE, mint_ratio)
    } else {
        let scale: u128 = 10u128.pow(rtoken_decimals - col_decimals);
        div_floor(rtoken_amount * DECIMAL_BASE, mint_ratio * scale)
    }
}
