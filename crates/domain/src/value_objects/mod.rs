pub mod amount;
pub mod quote;
pub mod slippage;
