//! CLI tool for deploying and operating the lending rewards contracts.

use lending_rewards::oracle::PriceValuationOracle;
use lending_rewards::rewards::RewardsController;
use lending_rewards::token::RewardToken;
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Ticks are one minute of block time
const TICK_DURATION: u64 = 60_000;

/// Oracle prices older than an hour are rejected
const MAX_PRICE_STALENESS: u64 = 3_600_000;

/// Deploys the reward token.
pub struct RewardTokenDeployScript;

impl DeployScript for RewardTokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_rewards::token::RewardTokenInitArgs;

        let _token = RewardToken::load_or_deploy(
            &env,
            RewardTokenInitArgs {
                name: String::from("Lending Reward"),
                symbol: String::from("LRW"),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the valuation oracle.
pub struct OracleDeployScript;

impl DeployScript for OracleDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_rewards::oracle::PriceValuationOracleInitArgs;

        let _oracle = PriceValuationOracle::load_or_deploy(
            &env,
            PriceValuationOracleInitArgs {
                max_staleness: MAX_PRICE_STALENESS,
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the rewards controller and makes it the token minter.
/// Requires the token and oracle to be deployed first. The deployer account
/// starts as registry and treasury; rotate them with the admin entry points.
pub struct RewardsDeployScript;

impl DeployScript for RewardsDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use lending_rewards::rewards::controller::RewardsControllerInitArgs;

        let mut token = container.contract_ref::<RewardToken>(env)?;
        let oracle = container.contract_ref::<PriceValuationOracle>(env)?;
        let caller = env.caller();

        let rewards = RewardsController::load_or_deploy(
            &env,
            RewardsControllerInitArgs {
                reward_issuer: token.address().clone(),
                valuation_oracle: oracle.address().clone(),
                registry: caller,
                treasury: caller,
                emission_rate: U256::from(1_000_000_000u64),
                treasury_emission_rate: U256::from(100_000_000u64),
                tick_duration: TICK_DURATION,
                emission_start: env.block_time() / TICK_DURATION + 1,
            },
            container,
            600_000_000_000
        )?;

        env.set_gas(50_000_000_000);
        token.set_minter(rewards.address().clone());

        Ok(())
    }
}

/// Deploys the complete rewards system.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        RewardTokenDeployScript.deploy(env, container)?;
        OracleDeployScript.deploy(env, container)?;
        RewardsDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to re-read every pool's value weight.
pub struct RefreshAllScenario;

impl Scenario for RefreshAllScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut rewards = container.contract_ref::<RewardsController>(env)?;

        env.set_gas(300_000_000_000);
        rewards.try_refresh_all()?;

        println!("Value weights refreshed, total: {}", rewards.total_value_weighted());
        Ok(())
    }
}

impl ScenarioMetadata for RefreshAllScenario {
    const NAME: &'static str = "refresh-all";
    const DESCRIPTION: &'static str = "Re-reads every pool's value weight from the oracle";
}

/// Scenario to change the pool emission rate.
pub struct SetEmissionRateScenario;

impl Scenario for SetEmissionRateScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "rate",
                "Reward units emitted per tick across all pools",
                NamedCLType::U256,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut rewards = container.contract_ref::<RewardsController>(env)?;
        let rate = args.get_single::<U256>("rate")?;

        env.set_gas(300_000_000_000);
        rewards.try_set_emission_rate(rate)?;

        println!("Emission rate set to {}", rate);
        Ok(())
    }
}

impl ScenarioMetadata for SetEmissionRateScenario {
    const NAME: &'static str = "set-emission-rate";
    const DESCRIPTION: &'static str = "Settles all pools and changes the emission rate";
}

/// Scenario to claim the treasury stream to the calling account.
pub struct ClaimTreasuryScenario;

impl Scenario for ClaimTreasuryScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut rewards = container.contract_ref::<RewardsController>(env)?;
        let treasury: Address = env.caller();

        env.set_gas(100_000_000_000);
        let amount = rewards.try_claim_treasury()?;

        println!("Treasury {:?} claimed {}", treasury, amount);
        Ok(())
    }
}

impl ScenarioMetadata for ClaimTreasuryScenario {
    const NAME: &'static str = "claim-treasury";
    const DESCRIPTION: &'static str = "Claims the treasury emission accrued so far";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the lending rewards contracts")
        // Deploy scripts
        .deploy(RewardTokenDeployScript)
        .deploy(OracleDeployScript)
        .deploy(RewardsDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<RewardToken>()
        .contract::<PriceValuationOracle>()
        .contract::<RewardsController>()
        // Scenarios
        .scenario(RefreshAllScenario)
        .scenario(SetEmissionRateScenario)
        .scenario(ClaimTreasuryScenario)
        .build()
        .run();
}
