use anchor_lang::prelude::*;

use crate::{
    errors::CrownFarmError,
    events::OwnershipTransferred,
    instructions::ManageVault,
    state::Capability,
};

pub fn transfer_ownership(ctx: Context<ManageVault>, new_owner: Pubkey) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.authorize(Capability::Owner, &ctx.accounts.authority.key())?;
    require_keys_neq!(new_owner, Pubkey::default(), CrownFarmError::InvalidNewOwner);

    let previous_owner = vault.authority;
    vault.authority = new_owner;

    emit!(OwnershipTransferred {
        vault_id: vault.vault_id,
        previous_owner,
        new_owner,
    });

    msg!("Ownership transferred from {} to {}", previous_owner, new_owner);

    Ok(())
}
