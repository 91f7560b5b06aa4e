use {
    async_trait::async_trait,
    creator_metadata::{
        error::MetadataError, find_metadata_pda_with_program, instruction::MetadataInstruction,
        processor::Processor, state::MetadataData,
    },
    creator_metadata_sdk::{AccountFetcher, MetadataClient, MetadataReader},
    solana_program::{
        instruction::{AccountMeta, Instruction, InstructionError},
        pubkey::Pubkey,
        system_program,
    },
    solana_program_test::{processor, BanksClient, BanksClientError, ProgramTest, ProgramTestContext},
    solana_sdk::{
        signature::{Keypair, Signer},
        transaction::{Transaction, TransactionError},
    },
};

/// Program test with the metadata processor running natively.
pub fn program_test() -> ProgramTest {
    init_tracing();
    let mut program_test = ProgramTest::new(
        "creator_metadata",
        creator_metadata::id(),
        processor!(Processor::process),
    );
    program_test.prefer_bpf(false);
    program_test
}

/// Install a fmt subscriber honoring `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `AccountFetcher` over the test bank.
pub struct BanksFetcher(pub BanksClient);

#[async_trait(?Send)]
impl AccountFetcher for BanksFetcher {
    async fn fetch_account_data(&self, address: &Pubkey) -> anyhow::Result<Option<Vec<u8>>> {
        let mut client = self.0.clone();
        let account = client
            .get_account(*address)
            .await
            .map_err(|e| anyhow::anyhow!("get_account {address}: {e}"))?;
        Ok(account.map(|a| a.data))
    }
}

/// Reader bound to the context's bank.
pub fn metadata_reader(context: &ProgramTestContext) -> MetadataReader<BanksFetcher> {
    MetadataReader::new(
        creator_metadata::id(),
        BanksFetcher(context.banks_client.clone()),
    )
}

/// Sign with the context payer plus `signers` and process.
pub async fn process_instructions(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let mut all_signers: Vec<&Keypair> = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        all_signers.as_slice(),
        context.last_blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

/// Create and initialize an SPL Token mint in its own transaction.
pub async fn create_and_init_mint(
    context: &mut ProgramTestContext,
    mint_kp: &Keypair,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> anyhow::Result<()> {
    let client = MetadataClient::default();
    let payer = context.payer.pubkey();
    let create_mint_ix = client.create_mint_account_ix(payer, mint_kp.pubkey());
    let init_mint_ix = client.initialize_mint2_ix(
        mint_kp.pubkey(),
        *mint_authority,
        freeze_authority.copied(),
        0,
    )?;
    process_instructions(context, &[create_mint_ix, init_mint_ix], &[mint_kp])
        .await
        .map_err(|e| anyhow::anyhow!("mint init failed: {e}"))?;
    tracing::debug!(mint = %mint_kp.pubkey(), authority = %mint_authority, "mint initialized");
    Ok(())
}

/// Build a CreateMetadataAccount instruction without client-side validation,
/// so invalid payloads reach the program.
#[allow(clippy::too_many_arguments)]
pub fn build_create_metadata_ix(
    program_id: Pubkey,
    payer_pk: Pubkey,
    mint_pk: Pubkey,
    mint_authority_pk: Pubkey,
    update_authority_pk: Pubkey,
    extra_signers: &[Pubkey],
    data: MetadataData,
    is_mutable: bool,
) -> (Instruction, Pubkey) {
    let (metadata_pda, _bump) = find_metadata_pda_with_program(&program_id, &mint_pk);

    let data = MetadataInstruction::CreateMetadataAccount { data, is_mutable }.pack();

    let mut accounts = vec![
        AccountMeta::new(payer_pk, true),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(mint_pk, false),
        AccountMeta::new(metadata_pda, false),
        AccountMeta::new_readonly(mint_authority_pk, true),
        AccountMeta::new_readonly(update_authority_pk, false),
    ];
    accounts.extend(
        extra_signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(*signer, true)),
    );

    let instruction = Instruction {
        program_id,
        accounts,
        data,
    };

    (instruction, metadata_pda)
}

/// Assert the transaction failed in instruction `index` with `expected`.
pub fn assert_metadata_error(
    result: Result<(), BanksClientError>,
    index: u8,
    expected: MetadataError,
) {
    assert_instruction_error(result, index, InstructionError::Custom(expected as u32));
}

/// Assert the transaction failed in instruction `index` with `expected`.
pub fn assert_instruction_error(
    result: Result<(), BanksClientError>,
    index: u8,
    expected: InstructionError,
) {
    let err = result.expect_err("transaction should fail");
    assert_eq!(
        err.unwrap(),
        TransactionError::InstructionError(index, expected)
    );
}
