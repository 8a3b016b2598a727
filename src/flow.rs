// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Waitlist Gate Contributors

//! Client-facing verification state machine.
//!
//! The signup flow is `Initial → AwaitingEmail → Success` with an error
//! side-channel that never changes the step and is cleared on the next
//! successful transition attempt. The machine is a pure function of
//! `(state, event)`; effects name the collaborator call the caller should
//! make next. `FlowDriver` runs the loop against balance and registration
//! collaborators.
//!
//! Attempts from `Initial` are bounded at 5 locally, on top of the server
//! gate's own limiting; once spent, further submits are refused until a
//! fresh state is created.

use crate::chain::lamports_to_sol;
use crate::config::{MAX_VERIFY_ATTEMPTS, MIN_BALANCE_SOL};
use crate::registration::{is_valid_email, normalize_email};

/// Message shown when the local attempt budget is spent.
pub const THROTTLE_MESSAGE: &str = "Too many attempts. Please try again later.";

/// Message shown when a field fails syntactic validation.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input format";

/// Message shown when the verified balance is below the threshold.
pub const BELOW_THRESHOLD_MESSAGE: &str =
    "Wallet balance must be above 250 SOL to join the waitlist";

/// Current step of the flow. Transitions are one-directional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Initial,
    AwaitingEmail,
    Success,
}

/// Ephemeral, caller-held flow state. Created fresh per session, never
/// persisted or shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    pub step: Step,
    /// Address submitted from `Initial`, carried into registration.
    pub wallet_address: Option<String>,
    /// Last verified balance in whole SOL.
    pub balance_sol: Option<f64>,
    pub error: Option<String>,
    pub attempts: u32,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Inputs to the machine: user submissions and collaborator outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SubmitAddress(String),
    BalanceVerified(f64),
    VerifyFailed(String),
    SubmitEmail(String),
    Registered,
    RegisterFailed(String),
}

/// Collaborator call the caller should perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    VerifyBalance(String),
    Register {
        wallet_address: String,
        email: String,
    },
}

/// Pure transition function.
///
/// Events that do not apply to the current step leave the state unchanged;
/// `Success` is terminal.
pub fn transition(mut state: FlowState, event: Event) -> (FlowState, Effect) {
    match (state.step, event) {
        (Step::Initial, Event::SubmitAddress(address)) => {
            if state.attempts >= MAX_VERIFY_ATTEMPTS {
                state.error = Some(THROTTLE_MESSAGE.to_string());
                return (state, Effect::None);
            }
            state.attempts += 1;

            let address = address.trim().to_string();
            if !crate::chain::is_valid_wallet_address(&address) {
                state.error = Some(INVALID_INPUT_MESSAGE.to_string());
                return (state, Effect::None);
            }

            state.error = None;
            state.wallet_address = Some(address.clone());
            (state, Effect::VerifyBalance(address))
        }
        (Step::Initial, Event::BalanceVerified(sol)) => {
            state.balance_sol = Some(sol);
            if sol >= MIN_BALANCE_SOL as f64 {
                state.step = Step::AwaitingEmail;
                state.error = None;
            } else {
                state.error = Some(BELOW_THRESHOLD_MESSAGE.to_string());
            }
            (state, Effect::None)
        }
        (Step::Initial, Event::VerifyFailed(message)) => {
            state.error = Some(message);
            (state, Effect::None)
        }
        (Step::AwaitingEmail, Event::SubmitEmail(email)) => {
            let email = normalize_email(&email);
            if !is_valid_email(&email) {
                state.error = Some(INVALID_INPUT_MESSAGE.to_string());
                return (state, Effect::None);
            }

            state.error = None;
            let wallet_address = state.wallet_address.clone().unwrap_or_default();
            (state, Effect::Register {
                wallet_address,
                email,
            })
        }
        (Step::AwaitingEmail, Event::Registered) => {
            state.step = Step::Success;
            state.error = None;
            (state, Effect::None)
        }
        (Step::AwaitingEmail, Event::RegisterFailed(message)) => {
            state.error = Some(message);
            (state, Effect::None)
        }
        // Success is terminal; mismatched events are ignored.
        (_, _) => (state, Effect::None),
    }
}

/// Balance collaborator seen from the flow.
#[allow(async_fn_in_trait)]
pub trait BalanceSource {
    async fn lamports(&self, address: &str) -> Result<u64, String>;
}

/// Registration collaborator seen from the flow.
#[allow(async_fn_in_trait)]
pub trait WaitlistSink {
    async fn register(&self, wallet_address: &str, email: &str) -> Result<(), String>;
}

impl BalanceSource for crate::chain::SolanaClient {
    async fn lamports(&self, address: &str) -> Result<u64, String> {
        self.get_balance(address).await.map_err(|e| e.to_string())
    }
}

impl WaitlistSink for crate::registration::RegistrationService<'_> {
    async fn register(&self, wallet_address: &str, email: &str) -> Result<(), String> {
        crate::registration::RegistrationService::register(self, wallet_address, email)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Runs the machine against its collaborators: applies the submit event,
/// performs the returned effect, and feeds the outcome back in.
pub struct FlowDriver<B, W> {
    state: FlowState,
    balances: B,
    waitlist: W,
}

impl<B: BalanceSource, W: WaitlistSink> FlowDriver<B, W> {
    pub fn new(balances: B, waitlist: W) -> Self {
        Self {
            state: FlowState::new(),
            balances,
            waitlist,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    fn apply(&mut self, event: Event) -> Effect {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = transition(state, event);
        self.state = next;
        effect
    }

    /// Submit a wallet address from `Initial`.
    pub async fn submit_address(&mut self, address: &str) {
        if let Effect::VerifyBalance(address) =
            self.apply(Event::SubmitAddress(address.to_string()))
        {
            let outcome = match self.balances.lamports(&address).await {
                Ok(lamports) => Event::BalanceVerified(lamports_to_sol(lamports)),
                Err(message) => Event::VerifyFailed(message),
            };
            self.apply(outcome);
        }
    }

    /// Submit an email from `AwaitingEmail`.
    pub async fn submit_email(&mut self, email: &str) {
        if let Effect::Register {
            wallet_address,
            email,
        } = self.apply(Event::SubmitEmail(email.to_string()))
        {
            let outcome = match self.waitlist.register(&wallet_address, &email).await {
                Ok(()) => Event::Registered,
                Err(message) => Event::RegisterFailed(message),
            };
            self.apply(outcome);
        }
    }
}
