use alloy::primitives::{Address, U256};
use anyhow::*;
use clap::{Parser, Subcommand};
use envconfig::Envconfig;
use sandbox_codec::{
    auction::AuctionOffer,
    events::{encode_event_signature, lookup_event},
    token_id::{parse_creator, TokenIdParts, TokenKind},
    MintBatch, SigningConfig, TokenId, TokenIdScheme,
};
use serde::Serialize;
use serde_json::json;

#[derive(Parser)]
#[command(version, about = "Token ids and signatures for the Sandbox contracts")]
struct Args {
    /// Increase log verbosity, may be repeated.
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the id of a minted token.
    TokenId {
        #[arg(long)]
        creator: String,
        #[arg(long)]
        supply: u64,
        #[arg(long, default_value_t = 0)]
        fixed_id: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 0)]
        nft_index: u64,
        /// Fold the supply into multi-copy ids, as older Asset contracts do.
        #[arg(long)]
        legacy: bool,
    },
    /// Split a token id into its fields.
    Decode {
        /// Decimal or 0x prefixed id.
        id: String,
        #[arg(long)]
        legacy: bool,
    },
    /// List the ids minted by a `mintMultiple` call.
    Batch {
        #[arg(long)]
        creator: String,
        #[arg(long)]
        fixed_id: u64,
        /// Supplies of the multi-copy tokens, comma separated.
        #[arg(long, value_delimiter = ',')]
        supplies: Vec<u64>,
        #[arg(long, default_value_t = 0)]
        nfts: u64,
        #[arg(long)]
        legacy: bool,
    },
    /// Sign a seller offer. The domain and the key are read from the
    /// SANDBOX_* environment variables unless overridden.
    SignAuction {
        #[arg(long)]
        private_key: Option<String>,
        #[arg(long)]
        chain_id: Option<u64>,
        #[arg(long)]
        verifying_contract: Option<Address>,
        /// Payment token, ether when omitted.
        #[arg(long, default_value_t = Address::ZERO)]
        token: Address,
        /// Random when omitted.
        #[arg(long)]
        offer_id: Option<U256>,
        #[arg(long)]
        starting_price: U256,
        #[arg(long)]
        ending_price: U256,
        #[arg(long)]
        started_at: U256,
        #[arg(long)]
        duration: U256,
        #[arg(long, default_value_t = U256::from(1))]
        packs: U256,
        #[arg(long, value_delimiter = ',')]
        ids: Vec<U256>,
        #[arg(long, value_delimiter = ',')]
        amounts: Vec<U256>,
    },
    /// Topic of an event signature such as `Transfer(address,address,uint256)`.
    EventSig { signature: String },
}

fn scheme(legacy: bool) -> TokenIdScheme {
    if legacy {
        TokenIdScheme::Legacy
    } else {
        TokenIdScheme::Current
    }
}

#[derive(Serialize)]
struct Decoded {
    creator: String,
    class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nft_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supply: Option<u64>,
    slot: u64,
}

impl From<&TokenIdParts> for Decoded {
    fn from(parts: &TokenIdParts) -> Self {
        let (class, nft_index, supply) = match parts.kind {
            TokenKind::Nft { nft_index } => ("nft", Some(nft_index), None),
            TokenKind::Multi { supply } => ("multi", None, supply),
        };
        Self {
            creator: parts.creator.to_checksum(None),
            class,
            nft_index,
            supply,
            slot: parts.slot,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    stderrlog::new()
        .verbosity(1 + args.verbose as usize)
        .init()
        .context("initializing logger")?;

    match args.command {
        Command::TokenId {
            creator,
            supply,
            fixed_id,
            index,
            nft_index,
            legacy,
        } => {
            let id = scheme(legacy).generate(&creator, supply, fixed_id, index, nft_index)?;
            if args.json {
                println!("{}", json!({ "id": id.to_string(), "hex": format!("0x{:x}", id.0) }));
            } else {
                println!("{id}");
            }
        }
        Command::Decode { id, legacy } => {
            let id = id.parse::<TokenId>()?;
            let parts = scheme(legacy).decode(id)?;
            if args.json {
                println!("{}", serde_json::to_string(&Decoded::from(&parts))?);
            } else {
                println!("creator: {}", parts.creator.to_checksum(None));
                match parts.kind {
                    TokenKind::Nft { nft_index } => println!("nft, index {nft_index}"),
                    TokenKind::Multi { supply: Some(supply) } => {
                        println!("multi-copy, supply {supply}")
                    }
                    TokenKind::Multi { supply: None } => println!("multi-copy"),
                }
                println!("slot: {}", parts.slot);
            }
        }
        Command::Batch {
            creator,
            fixed_id,
            supplies,
            nfts,
            legacy,
        } => {
            let batch = MintBatch::new(parse_creator(&creator)?, fixed_id)
                .with_supplies(supplies)
                .with_nfts(nfts);
            let ids = batch.token_ids(scheme(legacy))?;
            let range = batch.range()?;
            if args.json {
                let ids = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
                println!(
                    "{}",
                    json!({ "range": [range.start, range.end()], "ids": ids })
                );
            } else {
                eprintln!("reserves {range}");
                for id in ids {
                    println!("{id}");
                }
            }
        }
        Command::SignAuction {
            private_key,
            chain_id,
            verifying_contract,
            token,
            offer_id,
            starting_price,
            ending_price,
            started_at,
            duration,
            packs,
            ids,
            amounts,
        } => {
            let mut cfg = SigningConfig::init_from_env().context("reading SANDBOX_* variables")?;
            if let Some(key) = private_key {
                cfg.private_key = Some(key);
            }
            if let Some(chain_id) = chain_id {
                cfg.chain_id = chain_id;
            }
            if let Some(contract) = verifying_contract {
                cfg.verifying_contract = contract;
            }
            let signer = cfg
                .signer()?
                .ok_or_else(|| anyhow!("no private key: pass --private-key or set SANDBOX_PRIVATE_KEY"))?;
            let domain = cfg.domain();

            let offer = AuctionOffer {
                token,
                offer_id: offer_id.unwrap_or_default(),
                starting_price,
                ending_price,
                started_at,
                duration,
                packs,
                ids,
                amounts,
            };
            let offer = if offer_id.is_none() {
                offer.with_random_offer_id()
            } else {
                offer
            };
            let signed = offer.sign(&signer, &domain)?;

            if args.json {
                println!(
                    "{}",
                    json!({
                        "signer": signer.address().to_checksum(None),
                        "offer_id": offer.offer_id.to_string(),
                        "digest": signed.digest.to_string(),
                        "signature": signed.to_string(),
                    })
                );
            } else {
                println!("offer id: {}", offer.offer_id);
                println!("digest: {}", signed.digest);
                println!("signature: {signed}");
            }
        }
        Command::EventSig { signature } => {
            let topic = encode_event_signature(&signature);
            if args.json {
                println!(
                    "{}",
                    json!({ "topic": topic.to_string(), "known": lookup_event(&topic).is_some() })
                );
            } else {
                println!("{topic}");
            }
        }
    }

    Ok(())
}
