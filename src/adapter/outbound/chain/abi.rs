//! Contract bindings.

use alloy_sol_types::sol;

sol! {
    #[sol(rpc)]
    contract IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function decimals() external view returns (uint8);
    }
}

sol! {
    #[sol(rpc)]
    contract FeeConfig {
        function createBond() external view returns (uint256);
        function tradeFeeRate() external view returns (uint256);
        function settlementFeeRate() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    contract EventFactory {
        struct EventRecord {
            address creator;
            address ammAddress;
            uint256 createdAt;
            uint256 resolveAt;
            string category;
            string title;
            string description;
            string primarySource;
            bytes ruleBytes;
            uint256 createBondAmount;
            bool bondRefunded;
            bool finalized;
        }

        function createEvent(
            string category,
            string title,
            string description,
            uint256 resolveAt,
            string primarySource,
            bytes ruleBytes,
            uint256 initialLiquidity
        ) external returns (bytes32 marketId);
        function getEvent(bytes32 marketId) external view returns (EventRecord memory);
        function getCreatorEvents(address creator) external view returns (bytes32[] memory);
    }
}

sol! {
    #[sol(rpc)]
    contract MarketAMM {
        struct MarketData {
            uint256 yesReserve;
            uint256 noReserve;
            uint256 liquidityUsd;
            uint256 volumeUsd;
            uint256 totalLpSupply;
        }

        function buyYes(uint256 amountIn, uint256 minTokensOut) external returns (uint256 tokensOut);
        function buyNo(uint256 amountIn, uint256 minTokensOut) external returns (uint256 tokensOut);
        function provideLiquidity(uint256 amountIn) external returns (uint256 lpTokens);
        function getMarketData() external view returns (MarketData memory);
        function getUserPosition(address user) external view returns (uint256 yesTokens, uint256 noTokens, uint256 lpTokens);
    }
}

sol! {
    #[sol(rpc)]
    contract ResolutionManager {
        struct Resolution {
            uint8 state;
            address reporter;
            bool reportedOutcome;
            string evidenceURI;
            address disputer;
            string disputeReason;
            bool finalOutcome;
            bool isInvalid;
        }

        function report(bytes32 marketId, bool outcome, string evidenceURI) external;
        function dispute(bytes32 marketId, string reasonURI) external;
        function arbiterResolve(bytes32 marketId, bool finalOutcome) external;
        function invalidate(bytes32 marketId) external;
        function getResolutionState(bytes32 marketId) external view returns (uint8);
        function getResolution(bytes32 marketId) external view returns (Resolution memory);
    }
}
