use soroban_sdk::contracttype;

/// Error categories for classifying vault failures.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Vault bootstrap state: not ready, already configured
    Lifecycle = 1,
    /// Caller lacks the required role
    Authorization = 2,
    /// Malformed amount, config, or companion transfer
    Validation = 3,
    /// Balance cap, fee-delta cap, or arithmetic range
    LimitExceeded = 4,
    /// Operation does not fit the current governance state
    StateConflict = 5,
    /// Upgrade page count or hash mismatch
    Integrity = 6,
    /// Swap venue, router, or token collaborator failure
    External = 7,
    /// Rate read without settlement; never expected at correct call sites
    Programming = 8,
}

/// Error codes returned by every vault entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / authorisation      |
/// | 10 – 19 | Validation                     |
/// | 20 – 29 | Limits                         |
/// | 30 – 49 | Governance state               |
/// | 50 – 59 | Upgrade integrity              |
/// | 60 – 69 | External collaborators         |
/// | 70      | Settlement ordering            |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyConfigured = 1,
    NotReady = 2,
    Unauthorized = 3,

    InvalidConfig = 10,
    BelowMinimumPayment = 11,
    InsufficientPairedAsset = 12,
    ZeroAmount = 13,
    BelowMinimumProtest = 14,
    InvalidHashLength = 15,
    AmountBelowFees = 16,
    LstNotManaged = 17,

    BalanceCapExceeded = 20,
    FeeDeltaExceeded = 21,
    FeeRateTooHigh = 22,
    FeeWithdrawalExceeded = 23,
    ArithmeticOverflow = 24,

    NoPendingUpdate = 30,
    NoUpgradeStaged = 31,
    NotMatured = 32,
    ProtestOutstanding = 33,
    NotProtesting = 34,
    UpgradeInProgress = 35,
    BalancesOutstanding = 36,
    NodeRunnerFeesOutstanding = 37,
    NoSwapDue = 38,
    NoPendingAdmin = 39,
    AdminChangeExpired = 40,
    InsufficientStake = 41,

    PageCountMismatch = 50,
    PageHashMismatch = 51,

    SwapVenueUnsupported = 60,
    LiquidityDataUnavailable = 61,
    SwapFailed = 62,
    TransferFailed = 63,
    RecipientCannotReceive = 64,

    SettlementNotPerformed = 70,
}

impl VaultError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VaultError::AlreadyConfigured | VaultError::NotReady => ErrorCategory::Lifecycle,
            VaultError::Unauthorized => ErrorCategory::Authorization,
            VaultError::InvalidConfig
            | VaultError::BelowMinimumPayment
            | VaultError::InsufficientPairedAsset
            | VaultError::ZeroAmount
            | VaultError::BelowMinimumProtest
            | VaultError::InvalidHashLength
            | VaultError::AmountBelowFees
            | VaultError::LstNotManaged => ErrorCategory::Validation,
            VaultError::BalanceCapExceeded
            | VaultError::FeeDeltaExceeded
            | VaultError::FeeRateTooHigh
            | VaultError::FeeWithdrawalExceeded
            | VaultError::ArithmeticOverflow => ErrorCategory::LimitExceeded,
            VaultError::NoPendingUpdate
            | VaultError::NoUpgradeStaged
            | VaultError::NotMatured
            | VaultError::ProtestOutstanding
            | VaultError::NotProtesting
            | VaultError::UpgradeInProgress
            | VaultError::BalancesOutstanding
            | VaultError::NodeRunnerFeesOutstanding
            | VaultError::NoSwapDue
            | VaultError::NoPendingAdmin
            | VaultError::AdminChangeExpired
            | VaultError::InsufficientStake => ErrorCategory::StateConflict,
            VaultError::PageCountMismatch | VaultError::PageHashMismatch => {
                ErrorCategory::Integrity
            }
            VaultError::SwapVenueUnsupported
            | VaultError::LiquidityDataUnavailable
            | VaultError::SwapFailed
            | VaultError::TransferFailed
            | VaultError::RecipientCannotReceive => ErrorCategory::External,
            VaultError::SettlementNotPerformed => ErrorCategory::Programming,
        }
    }

    /// Short diagnostic for off-chain tooling.
    pub fn message(&self) -> &'static str {
        match self {
            VaultError::AlreadyConfigured => "Vault is already configured",
            VaultError::NotReady => "Vault is not ready",
            VaultError::Unauthorized => "Caller is not authorized for this operation",
            VaultError::InvalidConfig => "Invalid vault configuration",
            VaultError::BelowMinimumPayment => "Payment below minimum",
            VaultError::InsufficientPairedAsset => "Paired asset amount too low for current rate",
            VaultError::ZeroAmount => "Amount must be non-zero",
            VaultError::BelowMinimumProtest => "Protest amount below minimum",
            VaultError::InvalidHashLength => "Hash blob length is not a multiple of 32",
            VaultError::AmountBelowFees => "Amount does not cover fees",
            VaultError::LstNotManaged => "Vault is not the admin of the LST token",
            VaultError::BalanceCapExceeded => "Vault balance cap exceeded",
            VaultError::FeeDeltaExceeded => "Fee change exceeds maximum delta",
            VaultError::FeeRateTooHigh => "Combined fee rate above 100%",
            VaultError::FeeWithdrawalExceeded => "Withdrawal exceeds accrued fees",
            VaultError::ArithmeticOverflow => "Arithmetic overflow",
            VaultError::NoPendingUpdate => "No pending fee update",
            VaultError::NoUpgradeStaged => "No upgrade staged",
            VaultError::NotMatured => "Timelock has not matured",
            VaultError::ProtestOutstanding => "Protesting stake blocks the upgrade",
            VaultError::NotProtesting => "Holder is not protesting",
            VaultError::UpgradeInProgress => "An upgrade is staged",
            VaultError::BalancesOutstanding => "Staked or fee balances remain",
            VaultError::NodeRunnerFeesOutstanding => "Node runner fees remain unwithdrawn",
            VaultError::NoSwapDue => "No swap is due",
            VaultError::NoPendingAdmin => "No admin change proposed",
            VaultError::AdminChangeExpired => "Admin change proposal expired",
            VaultError::InsufficientStake => "Amount exceeds staked principal",
            VaultError::PageCountMismatch => "Upgrade page count mismatch",
            VaultError::PageHashMismatch => "Upgrade page hash mismatch",
            VaultError::SwapVenueUnsupported => "Swap venue type not supported",
            VaultError::LiquidityDataUnavailable => "Swap venue reserves unavailable",
            VaultError::SwapFailed => "Swap did not execute",
            VaultError::TransferFailed => "Token transfer failed",
            VaultError::RecipientCannotReceive => "Recipient cannot receive the paired asset",
            VaultError::SettlementNotPerformed => "Rate read without settlement",
        }
    }
}
