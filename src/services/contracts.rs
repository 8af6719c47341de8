use ethers::{
    abi::AbiEncode,
    contract::abigen,
    types::{Address, Bytes, U256},
};

abigen!(
    IERC20,
    r#"[
        function balanceOf(address owner) view returns (uint256)
        function decimals() view returns (uint8)
        function symbol() view returns (string)
    ]"#
);

abigen!(
    IQuoterV2,
    r#"[
        struct QuoteExactInputSingleParams { address tokenIn; address tokenOut; uint256 amountIn; uint24 fee; uint160 sqrtPriceLimitX96; }
        function quoteExactInputSingle(QuoteExactInputSingleParams memory params) returns (uint256 amountOut, uint160 sqrtPriceX96After, uint32 initializedTicksCrossed, uint256 gasEstimate)
    ]"#
);

abigen!(
    ISwapRouter02,
    r#"[
        struct ExactInputSingleParams { address tokenIn; address tokenOut; uint24 fee; address recipient; uint256 amountIn; uint256 amountOutMinimum; uint160 sqrtPriceLimitX96; }
        function exactInputSingle(ExactInputSingleParams calldata params) payable returns (uint256 amountOut)
    ]"#
);

/// Calldata for a single-pool exact-input swap with no price limit.
pub fn exact_input_single_calldata(
    token_in: Address,
    token_out: Address,
    fee: u32,
    recipient: Address,
    amount_in: U256,
    amount_out_minimum: U256,
) -> Bytes {
    let call = ExactInputSingleCall {
        params: ExactInputSingleParams {
            token_in,
            token_out,
            fee,
            recipient,
            amount_in,
            amount_out_minimum,
            sqrt_price_limit_x96: U256::zero(),
        },
    };
    Bytes::from(call.encode())
}

#[cfg(test)]
mod tests {
    use ethers::abi::AbiDecode;

    use super::*;

    #[test]
    fn swap_calldata_round_trips_through_the_router_abi() {
        let data = exact_input_single_calldata(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            3000,
            Address::repeat_byte(3),
            U256::exp10(16),
            U256::zero(),
        );
        // exactInputSingle((address,address,uint24,address,uint256,uint256,uint160))
        assert_eq!(&data[..4], &[0x04, 0xe4, 0x5a, 0xaf]);

        let call = ExactInputSingleCall::decode(&data).unwrap();
        assert_eq!(call.params.fee, 3000);
        assert_eq!(call.params.recipient, Address::repeat_byte(3));
        assert!(call.params.sqrt_price_limit_x96.is_zero());
    }
}
