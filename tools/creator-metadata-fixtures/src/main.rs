use anyhow::Context;
use creator_metadata::{
    find_metadata_pda_with_program, id as program_id_fn,
    instruction::MetadataInstruction,
    state::{Creator, MetadataData},
};
use serde_json::json;
use solana_program::{pubkey::Pubkey, system_program};

fn main() -> anyhow::Result<()> {
    // Deterministic example inputs
    let payer = Pubkey::new_from_array([1u8; 32]);
    let creator_a = Pubkey::new_from_array([4u8; 32]);
    let creator_b = Pubkey::new_from_array([5u8; 32]);

    let base = MetadataData {
        name: "Name".to_string(),
        symbol: "SYM".to_string(),
        uri: "https://u".to_string(),
        seller_fee_basis_points: 500,
        creators: None,
        collection: None,
        uses: None,
    };

    let create_plain = MetadataInstruction::CreateMetadataAccount {
        data: base.clone(),
        is_mutable: false,
    };
    let create_with_creators = MetadataInstruction::CreateMetadataAccount {
        data: MetadataData {
            creators: Some(vec![
                Creator {
                    address: creator_a,
                    verified: false,
                    share: 90,
                },
                Creator {
                    address: payer,
                    verified: true,
                    share: 1,
                },
                Creator {
                    address: creator_b,
                    verified: false,
                    share: 9,
                },
            ]),
            ..base
        },
        is_mutable: true,
    };

    let program_id = program_id_fn();
    // Two sample mints for PDA fixtures
    let mint_a = Pubkey::new_from_array([2u8; 32]);
    let mint_b = Pubkey::new_from_array([3u8; 32]);
    let (md_a, bump_a) = find_metadata_pda_with_program(&program_id, &mint_a);
    let (md_b, bump_b) = find_metadata_pda_with_program(&program_id, &mint_b);

    // Upstream fixtures: token program
    let token_program_id = spl_token::id();
    let init_mint2 =
        spl_token::instruction::initialize_mint2(&token_program_id, &mint_a, &payer, None, 0)?;

    let fixtures = json!({
        "CreateMetadataAccount": hex::encode(create_plain.pack()),
        "CreateMetadataAccountWithCreators": hex::encode(create_with_creators.pack()),
        "SystemProgram": system_program::id().to_string(),
        "ProgramId": program_id.to_string(),
        "TokenProgramId": token_program_id.to_string(),
        "PdaSamples": [
            {
                "mint": mint_a.to_string(),
                "metadata": md_a.to_string(),
                "bump": bump_a
            },
            {
                "mint": mint_b.to_string(),
                "metadata": md_b.to_string(),
                "bump": bump_b
            }
        ],
        "TokenInitializeMint2": hex::encode(init_mint2.data)
    });

    let out_dir = std::env::var("OUT_FIXTURES_DIR").unwrap_or_else(|_| {
        // default to project-relative path used by client tests
        "target/fixtures".to_string()
    });
    std::fs::create_dir_all(&out_dir).context("create fixtures dir")?;
    let path = format!("{}/metadata_instructions.json", out_dir);
    std::fs::write(&path, serde_json::to_vec_pretty(&fixtures)?)
        .with_context(|| format!("write {}", path))?;

    println!("wrote fixtures to {}", path);
    Ok(())
}
