use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, Transfer};

/// Transfer out of a program-owned token account. `signer_seeds` are the PDA
/// seeds of `authority`. Zero amounts are skipped.
pub fn transfer_signed<'info>(
    token_program: &Program<'info, Token>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Transfer authorized by a transaction signer (the token account owner or
/// its approved delegate). Balance and allowance failures come back from the
/// token program unchanged.
pub fn transfer_from_signer<'info>(
    token_program: &Program<'info, Token>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from,
                to,
                authority,
            },
        ),
        amount,
    )
}
