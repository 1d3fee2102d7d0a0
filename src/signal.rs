// Phone reception and the one-message mailbox between the leads.

use bevy::prelude::*;

use crate::actors::Stage;
use crate::sections::{Character, GameState, Mission};
use crate::story::SceneId;
use crate::zones::ZoneRegistry;

/// Leaves a message for the other lead. Only the fact that it is waiting
/// matters to the story.
pub fn send_message(state: &mut GameState, text: &str, sender: Character) {
    state.pending_message = true;
    state.recipient = sender.other();
    info!("{:?} sent a message to {:?}: {text}", sender, state.recipient);
}

/// Recomputes reception for whoever is active. Runs every tick, dialogue or not.
pub fn refresh(state: &mut GameState, zones: &ZoneRegistry, stage: &Stage) {
    let has_signal = zones.signal_at(stage, state.active().actor());
    if has_signal != state.has_signal {
        debug!("Signal {}", if has_signal { "found" } else { "lost" });
    }
    state.has_signal = has_signal;
}

/// Whether the waiting message can be read right now.
pub fn deliverable(state: &GameState) -> bool {
    state.has_signal && state.pending_message && !state.dialogue_active && state.active() == state.recipient
}

/// Picks the messaging beat to start this tick, if any. A delivery empties the
/// mailbox before its scene begins.
pub fn poll(state: &mut GameState) -> Option<SceneId> {
    if deliverable(state) {
        state.pending_message = false;
        info!("{:?} read the waiting message", state.recipient);
        return Some(SceneId::MessageDelivered);
    }
    if state.has_signal && !state.dialogue_active && state.is(Mission::ContactHim) {
        return Some(SceneId::ContactMenu);
    }
    None
}

/// The HUD's new-message notice.
pub fn notify(state: &GameState) -> bool {
    state.has_signal && state.pending_message && state.active() == state.recipient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::ActorId;

    fn setup() -> (GameState, ZoneRegistry, Stage) {
        (GameState::default(), ZoneRegistry::story(230.0), Stage::story(32.0, 0.06))
    }

    #[test]
    fn sending_addresses_the_other_lead() {
        let (mut state, _, _) = setup();
        send_message(&mut state, "Hi", Character::Alexandre);
        assert!(state.pending_message);
        assert_eq!(state.recipient, Character::Ana);
    }

    #[test]
    fn delivery_waits_for_reception() {
        let (mut state, zones, mut stage) = setup();
        state.mission = None;
        send_message(&mut state, "Hi", Character::Alexandre);

        refresh(&mut state, &zones, &stage);
        assert!(!state.has_signal);
        assert_eq!(poll(&mut state), None);
        assert!(state.pending_message);

        stage.place(ActorId::Ana, Vec2::new(992.0, 1850.0));
        refresh(&mut state, &zones, &stage);
        assert!(notify(&state));
        assert_eq!(poll(&mut state), Some(SceneId::MessageDelivered));
        assert!(!state.pending_message);
        assert_eq!(poll(&mut state), None);
    }

    #[test]
    fn only_the_recipient_reads_it() {
        let (mut state, zones, mut stage) = setup();
        state.mission = None;
        send_message(&mut state, "Hi", Character::Ana);
        stage.place(ActorId::Ana, Vec2::new(992.0, 1850.0));
        refresh(&mut state, &zones, &stage);
        assert!(state.has_signal);
        assert!(!notify(&state));
        assert_eq!(poll(&mut state), None);
        assert!(state.pending_message);
    }

    #[test]
    fn dialogue_holds_the_message_back() {
        let (mut state, zones, mut stage) = setup();
        send_message(&mut state, "Hi", Character::Alexandre);
        stage.place(ActorId::Ana, Vec2::new(52.0, 1920.0));
        state.dialogue_active = true;
        refresh(&mut state, &zones, &stage);
        assert!(state.has_signal);
        assert_eq!(poll(&mut state), None);
        assert!(state.pending_message);
    }

    #[test]
    fn contact_menu_needs_reception() {
        let (mut state, zones, mut stage) = setup();
        state.mission = Some(Mission::ContactHim);
        refresh(&mut state, &zones, &stage);
        assert_eq!(poll(&mut state), None);
        stage.place(ActorId::Ana, Vec2::new(874.0, 1042.0));
        refresh(&mut state, &zones, &stage);
        assert_eq!(poll(&mut state), Some(SceneId::ContactMenu));
    }
}
