use rand::Rng;
use serde::Serialize;

use crate::models::Category;
use crate::rates::PULL_COST;

const FIRST_TICKET_MILESTONE: (u32, u32) = (10, 2);
const SECOND_TICKET_MILESTONE: (u32, u32) = (50, 5);
const COPY_MILESTONE: u32 = 200;

/// Resources brought to a single banner.
#[derive(Clone, Copy, Debug)]
pub struct PullRequest {
    pub category: Category,
    pub diamonds: u64,
    pub tickets: u32,
    pub pity: u32,
    pub target_copies: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BannerPull {
    pub success: bool,
    pub total_pulls: u32,
    pub pulls_with_diamonds: u32,
    pub tickets_used: u32,
    pub milestone_tickets: u32,
    pub milestone_copies: u32,
    /// Draw copies plus the milestone copy.
    pub copies_obtained: u32,
    pub diamonds_remaining: u64,
    pub tickets_remaining: u32,
    pub final_pity: u32,
    pub diamonds_spent: u64,
}

impl BannerPull {
    pub fn base_copies(&self) -> u32 {
        self.copies_obtained - self.milestone_copies
    }
}

/// Pulls on one banner until the target is met or neither a ticket nor a
/// full pull's worth of diamonds is left. Tickets are spent before diamonds.
pub fn pull_banner<R: Rng + ?Sized>(request: PullRequest, rng: &mut R) -> BannerPull {
    let rates = request.category.rates();
    let mut result = BannerPull {
        diamonds_remaining: request.diamonds,
        tickets_remaining: request.tickets,
        final_pity: request.pity,
        ..BannerPull::default()
    };

    while result.copies_obtained < request.target_copies {
        if result.tickets_remaining > 0 {
            result.tickets_remaining -= 1;
            result.tickets_used += 1;
        } else if result.diamonds_remaining >= PULL_COST {
            result.diamonds_remaining -= PULL_COST;
            result.pulls_with_diamonds += 1;
        } else {
            break;
        }
        result.total_pulls += 1;

        let outcome = rates.draw(result.final_pity, rng);
        result.final_pity = outcome.pity;
        if outcome.featured {
            result.copies_obtained += 1;
        }

        match result.total_pulls {
            n if n == FIRST_TICKET_MILESTONE.0 => {
                result.milestone_tickets += FIRST_TICKET_MILESTONE.1;
                result.tickets_remaining =
                    result.tickets_remaining.saturating_add(FIRST_TICKET_MILESTONE.1);
            }
            n if n == SECOND_TICKET_MILESTONE.0 => {
                result.milestone_tickets += SECOND_TICKET_MILESTONE.1;
                result.tickets_remaining =
                    result.tickets_remaining.saturating_add(SECOND_TICKET_MILESTONE.1);
            }
            COPY_MILESTONE => {
                result.milestone_copies += 1;
                result.copies_obtained += 1;
            }
            _ => {}
        }
    }

    result.diamonds_spent = result.pulls_with_diamonds as u64 * PULL_COST;
    result.success = result.copies_obtained >= request.target_copies;
    result
}
