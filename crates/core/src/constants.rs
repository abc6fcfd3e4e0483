/// Notional trade size for the primary (ETH/USDC) route, in USD
pub const PRIMARY_ROUTE_NOTIONAL_USD: f64 = 10_000.0;

/// Notional trade size for secondary routes, in USD
pub const SECONDARY_ROUTE_NOTIONAL_USD: f64 = 5_000.0;

/// Minimum spread for an opportunity to be executed
pub const MIN_EXECUTION_SPREAD: f64 = 0.01;

/// Opportunities considered per execution pass
pub const MAX_EXECUTIONS_PER_PASS: usize = 3;

/// Opportunities older than this are dropped after each scan
pub const OPPORTUNITY_RETENTION_MINUTES: i64 = 10;

/// Minimum spread of each leg of a flash-loan pair
pub const FLASH_LOAN_MIN_LEG_SPREAD: f64 = 0.02;

/// Minimum combined spread for a flash-loan opportunity
pub const FLASH_LOAN_MIN_COMBINED_SPREAD: f64 = 0.05;

/// Minimum combined spread for a flash loan to be executed
pub const FLASH_LOAN_MIN_EXECUTION_SPREAD: f64 = 0.08;

/// Simulated flash-loan principal, in USD
pub const FLASH_LOAN_AMOUNT_USD: f64 = 50_000.0;

/// Trade history entries kept in memory
pub const MAX_TRADE_HISTORY: usize = 500;

/// Trades summed for the execution pass profit report
pub const RECENT_PROFIT_WINDOW: usize = 10;

/// Gas units of a plain transfer
pub const TRANSFER_GAS_UNITS: f64 = 21_000.0;

/// Gas cost estimate in ETH when no gas price has been observed
pub const DEFAULT_GAS_COST_ETH: f64 = 0.001;

/// Bounds of the simulated standard gas price, in gwei
pub const SIMULATED_GAS_MIN_GWEI: f64 = 20.0;
pub const SIMULATED_GAS_MAX_GWEI: f64 = 50.0;

/// Base portfolio value the simulated trading profit is added to, in USD
pub const PORTFOLIO_BASE_VALUE_USD: f64 = 15_000.0;

/// Success rate reported before any execution attempt, in percent
pub const DEFAULT_SUCCESS_RATE: f64 = 85.0;

/// Default chain id for wallet connections (Ethereum mainnet)
pub const DEFAULT_CHAIN_ID: u64 = 1;
