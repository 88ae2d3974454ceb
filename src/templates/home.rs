//! Fixed copy of the home page sections

use serde::Serialize;

/// A headline figure in the stats strip
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeroStat {
    pub value: &'static str,
    pub label: &'static str,
}

/// One of the protocol tokens
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TokenInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    /// Site-relative icon path
    pub icon: &'static str,
    /// CSS modifier: pusd, peth or polar
    pub color: &'static str,
}

/// A titled group of bullet points
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Milestone {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
}

/// Everything the home template renders besides site configuration
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HomeData {
    pub hero_tagline: &'static str,
    pub stats: &'static [HeroStat],
    pub how_it_works: &'static str,
    pub mechanics: &'static [Milestone],
    pub architecture: &'static str,
    pub tokens: &'static [TokenInfo],
    pub callout: &'static [&'static str],
    /// Slug of the post the callout links to
    pub callout_slug: &'static str,
    pub stablecoin_os: &'static str,
    pub stablecoin_os_milestones: &'static [Milestone],
    pub principles: &'static str,
    pub benefits: &'static [Milestone],
}

pub static HOME: HomeData = HomeData {
    hero_tagline: "We're building uncorrelated, scalable returns without T-Bills, without CEXs, without compromises.",
    stats: &[
        HeroStat {
            value: "Counterparty free",
            label: "Polaris is free of trusted assets or other offchain dependencies: the whole protocol lives onchain; transparent and auditable",
        },
        HeroStat {
            value: "Untapped yield source",
            label: "Harnesses novel, uncorrelated yield sources by monetizing volatility and growth via a bonding curve",
        },
        HeroStat {
            value: "Scalable yields",
            label: "pUSD and pETH harness self-correlated yield sources as their adoption and supply grow",
        },
        HeroStat {
            value: "Immutable & trustless",
            label: "Fully onchain, immutable and extensively verified: simulations, agent-based modeling and Tier-1 audits.",
        },
    ],
    how_it_works: "Polaris is a triple-engine stablecoin protocol built to solve the stablecoin \u{201c}Yield Trap\u{201d}. By monetizing pETH volatility via a bonding curve, conversion mechanics, and CDP architecture, Polaris generates uncorrelated yield that scales as the system grows without counterparty or credit risk.",
    mechanics: &[
        Milestone {
            title: "Bonding Curve",
            bullets: &["pETH, the protocol's collateral, is minted by depositing ETH into a bonding curve, capturing volatility and translating it into yield for pUSD borrowers."],
        },
        Milestone {
            title: "CDP Architecture",
            bullets: &["Polaris harnesses a CDP architecture optimized for growth and stability: it provides maximal guarantees to pUSD holders and compelling borrowing terms to pUSD borrowers. It's flexible and can cater for assets with negative interest rates, such as gold."],
        },
        Milestone {
            title: "POLAR Issuance",
            bullets: &["New POLAR is minted by performing the most synergistic action possible for the protocol: burning pETH, which raises its floor price, increasing pUSD's collateralization ratio and releasing additional yield."],
        },
    ],
    architecture: "Three interlocking primitives power the Polaris ecosystem, designed to generate sustainable yield while maintaining robust stability mechanisms.",
    tokens: &[
        TokenInfo {
            name: "pUSD",
            tagline: "Stability that pays you back",
            description: "Yield-bearing stablecoin minted against pETH, backed by pristine collateral with yield that scales with supply",
            icon: "/components/pusd-icon.svg",
            color: "pusd",
        },
        TokenInfo {
            name: "pETH",
            tagline: "Supercharged ETH with a safety net",
            description: "A token backed by ETH held within the bonding curve that benefits from an ever rising price floor growing with activity",
            icon: "/components/peth-icon.svg",
            color: "peth",
        },
        TokenInfo {
            name: "POLAR",
            tagline: "Stable beta, real yield",
            description: "Stewardship token minted via 1-way conversions, generating yield and increasing stability",
            icon: "/components/polar-icon.svg",
            color: "polar",
        },
    ],
    callout: &[
        "We analyzed where USDC, USDS, USDe, and LUSD fall short.",
        "And how pUSD delivers scalable, yield-bearing stability without counterparty risk.",
    ],
    callout_slug: "why-polaris",
    stablecoin_os: "The Polaris StablecoinOS is a framework to steward Polaris growth and enable selected projects to deploy their own decentralized stablecoin while benefiting from shared liquidity and protocol-level integrations.",
    stablecoin_os_milestones: &[
        Milestone {
            title: "Stewarded, not governed",
            bullets: &[
                "While no changes can be made to the core protocol logic, several parameters can be adjusted to adapt to any market situation and protocol growth stage.",
                "Only a small set of quantitative parameters can be adjusted, all within hard-coded safety bounds and subject to onchain voting and delay.",
                "POLAR holders can lock their token to obtain vePOLAR and vote on those changes and the distribution of incentives to grow the ecosystem.",
            ],
        },
        Milestone {
            title: "Forkable infrastructure, shared liquidity",
            bullets: &[
                "The Polaris CDP infrastructure can be forked to deliver stablecoins tracking any currency or commodities: pCHF, pGOLD, etc.",
                "Obtaining the licensing right over the CDP infrastructure requires the approval of vePOLAR holders.",
                "Many pFiats/pCommodities, but one pETH: all stablecoins share the same collateral, further contributing to the resilience of the whole ecosystem.",
            ],
        },
        Milestone {
            title: "True community ownership",
            bullets: &[
                "Any participant of the Polaris ecosystem, not just the forks, can join the StablecoinOS: integrators, frontends, etc.",
                "Doing so requires sharing revenues with vePOLAR holders, enabling them to gain access to a stream of incentives proportional to the gauge-voting they receive to grow their application.",
                "vePOLAR holders are the ones allocating resources within the ecosystem to foster its growth.",
            ],
        },
    ],
    principles: "We've been in the trenches for too long to see the space we've dedicated our lives to end up neutralized. Polaris is our ultimate answer to the centralization of DeFi.",
    benefits: &[
        Milestone {
            title: "Zero value leakage, maximal growth potential",
            bullets: &["By internalizing all system activity, Polaris ensures no value is leaked to external parties, capturing all revenue streams and redirecting them to best support the protocol and overall ecosystem."],
        },
        Milestone {
            title: "Scalable, without offchain dependencies",
            bullets: &["Unlike other stablecoins that might experience fast early growth, but eventually plateau and turn into T-bill wrappers; Polaris creates and nurtures its own yield source as it grows, enabling yield that scales regardless of whether $10M or $10B pUSD are minted."],
        },
        Milestone {
            title: "Immutable core, unlimited growth",
            bullets: &["Polaris provides maximal guarantees to its users thanks to its immutability while still being able to evolve and incorporate new product offerings thanks to its stewards."],
        },
        Milestone {
            title: "Built by a team with 7 years of stablecoin experience",
            bullets: &["The Polaris team is composed of experienced Solidity developers who shipped several stablecoins. They learned from their experience, and are joined by DeFi legends to face the final boss."],
        },
    ],
};
