//! Player decisions.
//!
//! A `GameInput` is one decision submitted to `GameState::next`. Top-level
//! inputs start a turn's action. Follow-up inputs answer a pending decision
//! and carry an [`InputContext`] naming the input kind and entity that
//! spawned them, plus any data earlier steps of the chain need to hand on.
//!
//! ## Wire shape
//!
//! Inputs serialize as plain tagged documents with an `inputType`
//! discriminator:
//!
//! ```
//! use everdell_engine::core::GameInput;
//! use everdell_engine::locations::LocationName;
//!
//! let input = GameInput::place_worker(LocationName::BasicOneBerry);
//! let json = serde_json::to_string(&input).unwrap();
//! assert_eq!(json, r#"{"inputType":"PLACE_WORKER","location":"BASIC_ONE_BERRY"}"#);
//! ```
//!
//! ## Templates
//!
//! A pending decision is a follow-up input whose `client_options` slot is
//! empty. A submitted answer matches the pending head when clearing its
//! `client_options` yields the head exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::PlayerId;
use super::resources::{ResourceType, Resources};
use crate::adornments::AdornmentName;
use crate::cards::CardName;
use crate::events::EventName;
use crate::locations::LocationName;

/// Discriminant of a [`GameInput`], without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    PlaceWorker,
    PlayCard,
    VisitDestinationCard,
    ClaimEvent,
    PlayAdornment,
    PrepareForSeason,
    GameEnd,
    SelectCards,
    SelectPlayedCards,
    SelectResources,
    SelectOption,
    SelectLocation,
    SelectPlayer,
}

impl InputKind {
    /// Position in the available-input listing. Lower sorts first.
    #[must_use]
    pub fn sort_rank(self) -> u8 {
        match self {
            InputKind::ClaimEvent => 0,
            InputKind::PlayCard => 1,
            InputKind::PlaceWorker => 2,
            InputKind::VisitDestinationCard => 3,
            InputKind::PrepareForSeason => 4,
            InputKind::GameEnd => 5,
            _ => 10,
        }
    }

    /// Does this kind answer a pending decision?
    #[must_use]
    pub fn is_follow_up(self) -> bool {
        matches!(
            self,
            InputKind::SelectCards
                | InputKind::SelectPlayedCards
                | InputKind::SelectResources
                | InputKind::SelectOption
                | InputKind::SelectLocation
                | InputKind::SelectPlayer
        )
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::PlaceWorker => "PLACE_WORKER",
            InputKind::PlayCard => "PLAY_CARD",
            InputKind::VisitDestinationCard => "VISIT_DESTINATION_CARD",
            InputKind::ClaimEvent => "CLAIM_EVENT",
            InputKind::PlayAdornment => "PLAY_ADORNMENT",
            InputKind::PrepareForSeason => "PREPARE_FOR_SEASON",
            InputKind::GameEnd => "GAME_END",
            InputKind::SelectCards => "SELECT_CARDS",
            InputKind::SelectPlayedCards => "SELECT_PLAYED_CARDS",
            InputKind::SelectResources => "SELECT_RESOURCES",
            InputKind::SelectOption => "SELECT_OPTION",
            InputKind::SelectLocation => "SELECT_LOCATION",
            InputKind::SelectPlayer => "SELECT_PLAYER",
        };
        f.write_str(name)
    }
}

/// The entity whose effect spawned a follow-up decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityRef {
    Card { card: CardName },
    Location { location: LocationName },
    Event { event: EventName },
    Adornment { adornment: AdornmentName },
    /// Seasonal effects (summer meadow draw).
    Season,
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Card { card } => write!(f, "{}", card),
            EntityRef::Location { location } => write!(f, "{}", location),
            EntityRef::Event { event } => write!(f, "{}", event),
            EntityRef::Adornment { adornment } => write!(f, "{}", adornment),
            EntityRef::Season => f.write_str("SEASON"),
        }
    }
}

impl From<CardName> for EntityRef {
    fn from(card: CardName) -> Self {
        EntityRef::Card { card }
    }
}

impl From<LocationName> for EntityRef {
    fn from(location: LocationName) -> Self {
        EntityRef::Location { location }
    }
}

impl From<EventName> for EntityRef {
    fn from(event: EventName) -> Self {
        EntityRef::Event { event }
    }
}

impl From<AdornmentName> for EntityRef {
    fn from(adornment: AdornmentName) -> Self {
        EntityRef::Adornment { adornment }
    }
}

/// Data handed from one step of a decision chain to the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Carried {
    Location(LocationName),
    Card(CardName),
    Cards(Vec<CardName>),
    Player(PlayerId),
    Count(u32),
}

/// Origin of a follow-up decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputContext {
    /// Kind of the input whose resolution spawned this decision.
    pub prev_input_type: InputKind,
    pub source: EntityRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carried: Option<Carried>,
}

impl InputContext {
    #[must_use]
    pub fn new(prev_input_type: InputKind, source: impl Into<EntityRef>) -> Self {
        Self {
            prev_input_type,
            source: source.into(),
            carried: None,
        }
    }

    /// Attach chain data.
    #[must_use]
    pub fn carrying(mut self, carried: Carried) -> Self {
        self.carried = Some(carried);
        self
    }
}

/// One option of a `SELECT_OPTION` decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Choice {
    Resource(ResourceType),
    Card(CardName),
    Adornment(AdornmentName),
}

impl Choice {
    /// One option per basic resource, for "gain one ANY".
    #[must_use]
    pub fn any_resource() -> Vec<Choice> {
        ResourceType::BASIC.into_iter().map(Choice::Resource).collect()
    }
}

/// A card in a specific player's city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayedCardRef {
    pub owner: PlayerId,
    pub card: CardName,
}

/// How a `PLAY_CARD` input pays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    /// Resources actually handed over.
    #[serde(default)]
    pub resources: Resources,
    /// A card that changes the price: an associated construction in the
    /// city, or an Innkeeper, Crane or Judge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_to_use: Option<CardName>,
}

impl PaymentOptions {
    /// Pay `resources` with no modifier card.
    #[must_use]
    pub fn resources(resources: Resources) -> Self {
        Self {
            resources,
            card_to_use: None,
        }
    }

    /// Pay `resources` using `card` as a modifier.
    #[must_use]
    pub fn using(card: CardName, resources: Resources) -> Self {
        Self {
            resources,
            card_to_use: Some(card),
        }
    }
}

/// Choose cards from an explicit list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCards {
    pub context: InputContext,
    pub card_options: Vec<CardName>,
    pub min_to_select: usize,
    pub max_to_select: usize,
    #[serde(default)]
    pub client_options: Vec<CardName>,
}

/// Choose cards already in some city.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlayedCards {
    pub context: InputContext,
    pub card_options: Vec<PlayedCardRef>,
    pub min_to_select: usize,
    pub max_to_select: usize,
    #[serde(default)]
    pub client_options: Vec<PlayedCardRef>,
}

/// Choose a bag of resources to gain or spend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectResources {
    pub context: InputContext,
    pub to_spend: bool,
    pub min_resources: u32,
    pub max_resources: u32,
    /// Per-kind caps. `None` allows any basic resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Resources>,
    #[serde(default)]
    pub client_options: Resources,
}

/// Choose exactly one of an explicit list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub context: InputContext,
    pub options: Vec<Choice>,
    #[serde(default)]
    pub client_options: Option<Choice>,
}

/// Choose one location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectLocation {
    pub context: InputContext,
    pub location_options: Vec<LocationName>,
    #[serde(default)]
    pub client_options: Option<LocationName>,
}

/// Choose one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlayer {
    pub context: InputContext,
    pub player_options: Vec<PlayerId>,
    #[serde(default)]
    pub client_options: Option<PlayerId>,
}

/// A decision submitted by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "inputType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameInput {
    PlaceWorker {
        location: LocationName,
    },
    PlayCard {
        card: CardName,
        #[serde(rename = "fromMeadow")]
        from_meadow: bool,
        #[serde(rename = "paymentOptions", default)]
        payment: PaymentOptions,
    },
    VisitDestinationCard {
        card: CardName,
        owner: PlayerId,
    },
    ClaimEvent {
        event: EventName,
    },
    PlayAdornment {
        adornment: AdornmentName,
    },
    PrepareForSeason,
    GameEnd,
    SelectCards(SelectCards),
    SelectPlayedCards(SelectPlayedCards),
    SelectResources(SelectResources),
    SelectOption(SelectOption),
    SelectLocation(SelectLocation),
    SelectPlayer(SelectPlayer),
}

impl GameInput {
    // === Constructors ===

    #[must_use]
    pub fn place_worker(location: LocationName) -> Self {
        GameInput::PlaceWorker { location }
    }

    /// Play `card` from hand paying its printed cost.
    #[must_use]
    pub fn play_card(card: CardName) -> Self {
        GameInput::PlayCard {
            card,
            from_meadow: false,
            payment: PaymentOptions::resources(card.definition().cost),
        }
    }

    /// Play `card` from the meadow paying its printed cost.
    #[must_use]
    pub fn play_from_meadow(card: CardName) -> Self {
        GameInput::PlayCard {
            card,
            from_meadow: true,
            payment: PaymentOptions::resources(card.definition().cost),
        }
    }

    /// Play `card` with explicit payment.
    #[must_use]
    pub fn play_card_with(card: CardName, from_meadow: bool, payment: PaymentOptions) -> Self {
        GameInput::PlayCard {
            card,
            from_meadow,
            payment,
        }
    }

    #[must_use]
    pub fn visit_destination(card: CardName, owner: PlayerId) -> Self {
        GameInput::VisitDestinationCard { card, owner }
    }

    #[must_use]
    pub fn claim_event(event: EventName) -> Self {
        GameInput::ClaimEvent { event }
    }

    #[must_use]
    pub fn play_adornment(adornment: AdornmentName) -> Self {
        GameInput::PlayAdornment { adornment }
    }

    // === Decision templates ===

    #[must_use]
    pub fn select_cards(
        context: InputContext,
        card_options: Vec<CardName>,
        min_to_select: usize,
        max_to_select: usize,
    ) -> Self {
        GameInput::SelectCards(SelectCards {
            context,
            card_options,
            min_to_select,
            max_to_select,
            client_options: Vec::new(),
        })
    }

    #[must_use]
    pub fn select_played_cards(
        context: InputContext,
        card_options: Vec<PlayedCardRef>,
        min_to_select: usize,
        max_to_select: usize,
    ) -> Self {
        GameInput::SelectPlayedCards(SelectPlayedCards {
            context,
            card_options,
            min_to_select,
            max_to_select,
            client_options: Vec::new(),
        })
    }

    /// Gain exactly `amount` basic resources of the player's choosing.
    #[must_use]
    pub fn select_any(context: InputContext, amount: u32) -> Self {
        GameInput::SelectResources(SelectResources {
            context,
            to_spend: false,
            min_resources: amount,
            max_resources: amount,
            limits: None,
            client_options: Resources::new(),
        })
    }

    /// Spend between zero and `max` resources within `limits`.
    #[must_use]
    pub fn select_to_spend(context: InputContext, limits: Resources, max: u32) -> Self {
        GameInput::SelectResources(SelectResources {
            context,
            to_spend: true,
            min_resources: 0,
            max_resources: max,
            limits: Some(limits),
            client_options: Resources::new(),
        })
    }

    /// Gain one basic resource.
    #[must_use]
    pub fn select_one_any(context: InputContext) -> Self {
        Self::select_option(context, Choice::any_resource())
    }

    #[must_use]
    pub fn select_option(context: InputContext, options: Vec<Choice>) -> Self {
        GameInput::SelectOption(SelectOption {
            context,
            options,
            client_options: None,
        })
    }

    #[must_use]
    pub fn select_location(context: InputContext, location_options: Vec<LocationName>) -> Self {
        GameInput::SelectLocation(SelectLocation {
            context,
            location_options,
            client_options: None,
        })
    }

    #[must_use]
    pub fn select_player(context: InputContext, player_options: Vec<PlayerId>) -> Self {
        GameInput::SelectPlayer(SelectPlayer {
            context,
            player_options,
            client_options: None,
        })
    }

    // === Inspection ===

    #[must_use]
    pub fn kind(&self) -> InputKind {
        match self {
            GameInput::PlaceWorker { .. } => InputKind::PlaceWorker,
            GameInput::PlayCard { .. } => InputKind::PlayCard,
            GameInput::VisitDestinationCard { .. } => InputKind::VisitDestinationCard,
            GameInput::ClaimEvent { .. } => InputKind::ClaimEvent,
            GameInput::PlayAdornment { .. } => InputKind::PlayAdornment,
            GameInput::PrepareForSeason => InputKind::PrepareForSeason,
            GameInput::GameEnd => InputKind::GameEnd,
            GameInput::SelectCards(_) => InputKind::SelectCards,
            GameInput::SelectPlayedCards(_) => InputKind::SelectPlayedCards,
            GameInput::SelectResources(_) => InputKind::SelectResources,
            GameInput::SelectOption(_) => InputKind::SelectOption,
            GameInput::SelectLocation(_) => InputKind::SelectLocation,
            GameInput::SelectPlayer(_) => InputKind::SelectPlayer,
        }
    }

    #[must_use]
    pub fn is_follow_up(&self) -> bool {
        self.kind().is_follow_up()
    }

    /// Origin of a follow-up input. `None` for top-level inputs.
    #[must_use]
    pub fn context(&self) -> Option<&InputContext> {
        match self {
            GameInput::SelectCards(s) => Some(&s.context),
            GameInput::SelectPlayedCards(s) => Some(&s.context),
            GameInput::SelectResources(s) => Some(&s.context),
            GameInput::SelectOption(s) => Some(&s.context),
            GameInput::SelectLocation(s) => Some(&s.context),
            GameInput::SelectPlayer(s) => Some(&s.context),
            _ => None,
        }
    }

    /// This input with its answer slot cleared.
    #[must_use]
    pub fn template(&self) -> GameInput {
        let mut out = self.clone();
        match &mut out {
            GameInput::SelectCards(s) => s.client_options.clear(),
            GameInput::SelectPlayedCards(s) => s.client_options.clear(),
            GameInput::SelectResources(s) => s.client_options = Resources::new(),
            GameInput::SelectOption(s) => s.client_options = None,
            GameInput::SelectLocation(s) => s.client_options = None,
            GameInput::SelectPlayer(s) => s.client_options = None,
            _ => {}
        }
        out
    }

    /// Does this answer belong to the pending decision `head`?
    #[must_use]
    pub fn answers(&self, head: &GameInput) -> bool {
        self.is_follow_up() && self.template() == *head
    }

    // === Answering ===
    //
    // Each `with_*` fills the answer slot when the kind matches and returns
    // the input unchanged otherwise.

    #[must_use]
    pub fn with_cards(mut self, cards: Vec<CardName>) -> Self {
        if let GameInput::SelectCards(s) = &mut self {
            s.client_options = cards;
        }
        self
    }

    #[must_use]
    pub fn with_played_cards(mut self, cards: Vec<PlayedCardRef>) -> Self {
        if let GameInput::SelectPlayedCards(s) = &mut self {
            s.client_options = cards;
        }
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        if let GameInput::SelectResources(s) = &mut self {
            s.client_options = resources;
        }
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choice: Choice) -> Self {
        if let GameInput::SelectOption(s) = &mut self {
            s.client_options = Some(choice);
        }
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: LocationName) -> Self {
        if let GameInput::SelectLocation(s) = &mut self {
            s.client_options = Some(location);
        }
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        if let GameInput::SelectPlayer(s) = &mut self {
            s.client_options = Some(player);
        }
        self
    }
}

impl fmt::Display for GameInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameInput::PlaceWorker { location } => write!(f, "PLACE_WORKER {}", location),
            GameInput::PlayCard {
                card, from_meadow, ..
            } => {
                let from = if *from_meadow { "meadow" } else { "hand" };
                write!(f, "PLAY_CARD {} from {}", card, from)
            }
            GameInput::VisitDestinationCard { card, owner } => {
                write!(f, "VISIT_DESTINATION_CARD {} of {}", card, owner)
            }
            GameInput::ClaimEvent { event } => write!(f, "CLAIM_EVENT {}", event),
            GameInput::PlayAdornment { adornment } => write!(f, "PLAY_ADORNMENT {}", adornment),
            other => match other.context() {
                Some(ctx) => write!(f, "{} for {}", other.kind(), ctx.source),
                None => write!(f, "{}", other.kind()),
            },
        }
    }
}

/// One accepted input, in the order it was applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub player: PlayerId,
    pub input: GameInput,
    pub turn: u32,
}
