//! The command catalog: every action a session can request.
//!
//! Three types work together here:
//!
//! - [`CommandKind`]: a fieldless enum naming each command. Its
//!   discriminant **is** the opcode the collaborator dispatches on, so
//!   the mapping from command to identifier is total and fixed at
//!   compile time.
//! - [`Command`]: the same catalog, but each variant carries its typed
//!   parameters. This is what callers (and `Session`) build.
//! - [`Invocation`]: the encoded form: opcode plus an ordered list of
//!   [`Arg`]s. This is what crosses the collaborator seam.
//!
//! ```text
//! Command::BuyMount { mount: MountType::Cow }
//!     │ encode()
//!     ▼
//! Invocation { command: BuyMount (210), args: [U8(1)] }
//! ```
//!
//! Opcodes are grouped by shape: 1–31 take no arguments, 100–143 take
//! primitives, 200–215 take at least one vocabulary value.

use serde::{Deserialize, Serialize};

use crate::{
    ArgumentError, AttributeType, FortressBuildingType, FortressResourceType,
    FortressUnitType, FortunePaymentType, GuildSkillType, HellevatorTreatType,
    MountType, PlayerItemPlaceType, TimeSkipType, UnderworldBuildingType,
    UnderworldResourceType, UnderworldUnitType,
};

// ---------------------------------------------------------------------------
// CommandKind: the opcode table
// ---------------------------------------------------------------------------

wire_enum! {
    /// The identifier of a catalog command, as understood by the collaborator.
    pub enum CommandKind: u16 {
        // -- No arguments --
        Update = 1,
        BuyBeer = 2,
        CancelQuest = 3,
        FinishWork = 4,
        CheckArena = 5,
        CollectCalendar = 6,
        ToiletFlush = 7,
        ToiletOpen = 8,
        CancelWork = 9,
        GuildLoadMushrooms = 10,
        GuildJoinAttack = 11,
        GuildJoinDefense = 12,
        GuildRaid = 13,
        GuildPortalBattle = 14,
        GuildGetFightableTargets = 15,
        ViewScrapbook = 16,
        FightPortal = 17,
        SwapManequin = 18,
        IdleSacrifice = 19,
        HellevatorEnter = 20,
        HellevatorViewGuildRanking = 21,
        HellevatorRefreshShop = 22,
        HellevatorClaimDaily = 23,
        HellevatorClaimDailyYesterday = 24,
        HellevatorClaimFinal = 25,
        HellevatorPreviewRewards = 26,
        BuyGoldFrame = 27,
        FortressGemStoneSearch = 28,
        FortressGemStoneSearchCancel = 29,
        FortressUpgradeHallOfKnights = 30,
        ExpeditionContinue = 31,

        // -- Primitive arguments --
        HallOfFamePage = 100,
        HallOfFameFortressPage = 101,
        ViewPlayer = 102,
        StartQuest = 103,
        StartWork = 104,
        RemovePotion = 105,
        Fight = 106,
        GuildAttack = 107,
        FinishQuest = 108,
        CheckNameAvailable = 109,
        ViewGuild = 110,
        GuildFound = 111,
        GuildInvitePlayer = 112,
        GuildKickPlayer = 113,
        GuildSetLeader = 114,
        GuildToggleOfficer = 115,
        MessageOpen = 116,
        MessageDelete = 117,
        ViewPet = 118,
        GambleSilver = 119,
        GambleMushrooms = 120,
        SendMessage = 121,
        Whisper = 122,
        SetLanguage = 123,
        FortressNewEnemy = 124,
        FortressSetCaEnemy = 125,
        GuildPetBattle = 126,
        HallOfFameGroupPage = 127,
        HallOfFameUnderworldPage = 128,
        HallOfFamePetsPage = 129,
        BlockGuildInvites = 130,
        ShowTips = 131,
        UnlockFeature = 132,
        ExpeditionStart = 133,
        ExpeditionPickEncounter = 134,
        ExpeditionPickReward = 135,
        HallOfFameHellevatorPage = 136,
        ClaimablePreview = 137,
        ClaimableClaim = 138,
        HellevatorJoinHellAttack = 139,
        HellevatorFight = 140,
        FortressGemStoneSearchFinish = 141,
        FortressAttack = 142,
        FortressGatherSecretStorage = 143,

        // -- Vocabulary arguments --
        FortressBuild = 200,
        FortressBuildCancel = 201,
        FortressBuildFinish = 202,
        FortressBuildUnit = 203,
        FortressGather = 204,
        UnderworldCollect = 205,
        UnderworldUnitUpgrade = 206,
        UnderworldUpgradeCancel = 207,
        UnderworldUpgradeFinish = 208,
        SpinWheelOfFortune = 209,
        BuyMount = 210,
        IncreaseAttribute = 211,
        GuildIncreaseSkill = 212,
        ToiletDrop = 213,
        ExpeditionSkipWait = 214,
        HellevatorBuy = 215,
    }
}

impl CommandKind {
    /// The numeric identifier sent to the collaborator.
    pub const fn opcode(self) -> u16 {
        self.wire_code()
    }
}

// ---------------------------------------------------------------------------
// Arg: one encoded argument
// ---------------------------------------------------------------------------

/// A single encoded argument, tagged with its wire width.
///
/// The width is part of the contract: a page index is always a `U64`,
/// a pet id always a `U16`, no matter how small the actual value is.
///
/// `#[serde(tag = "type", content = "value")]` produces adjacently
/// tagged JSON: `{ "type": "U16", "value": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Arg {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I32(i32),
    I64(i64),
    Str(String),
}

impl Arg {
    /// Encodes a page or position index.
    ///
    /// Indices are pointer-sized in the API but always travel as 64 bits.
    fn index(value: usize) -> Self {
        // usize is at most 64 bits on every supported target.
        Self::U64(value as u64)
    }

    fn text(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Invocation: what the collaborator receives
// ---------------------------------------------------------------------------

/// A fully encoded command: opcode plus arguments in parameter order.
///
/// ```rust
/// use fidget_protocol::{Arg, Command, CommandKind, MountType};
///
/// let invocation = Command::BuyMount { mount: MountType::Cow }
///     .encode()
///     .unwrap();
///
/// assert_eq!(invocation.command, CommandKind::BuyMount);
/// assert_eq!(invocation.args, vec![Arg::U8(1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Which command to run. Serialized as its opcode.
    pub command: CommandKind,

    /// The encoded parameters, in the order the command declares them.
    pub args: Vec<Arg>,
}

// ---------------------------------------------------------------------------
// Command: the typed catalog
// ---------------------------------------------------------------------------

/// One request from the catalog, with its typed parameters.
///
/// Most variants can be built directly. `StartWork` carries a `u8`, so
/// an hour count that doesn't fit can't be represented; use
/// [`Command::start_work`] to convert from a wider input with a proper
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // -- No arguments --
    Update,
    BuyBeer,
    CancelQuest,
    FinishWork,
    CheckArena,
    CollectCalendar,
    ToiletFlush,
    ToiletOpen,
    CancelWork,
    GuildLoadMushrooms,
    GuildJoinAttack,
    GuildJoinDefense,
    GuildRaid,
    GuildPortalBattle,
    GuildGetFightableTargets,
    ViewScrapbook,
    FightPortal,
    SwapManequin,
    IdleSacrifice,
    HellevatorEnter,
    HellevatorViewGuildRanking,
    HellevatorRefreshShop,
    HellevatorClaimDaily,
    HellevatorClaimDailyYesterday,
    HellevatorClaimFinal,
    HellevatorPreviewRewards,
    BuyGoldFrame,
    FortressGemStoneSearch,
    FortressGemStoneSearchCancel,
    FortressUpgradeHallOfKnights,
    ExpeditionContinue,

    // -- Primitive arguments --
    HallOfFamePage { page: usize },
    HallOfFameFortressPage { page: usize },
    ViewPlayer { ident: String },
    StartQuest { quest_pos: usize, overwrite_inv: bool },
    StartWork { hours: u8 },
    RemovePotion { pos: usize },
    Fight { name: String, use_mushroom: bool },
    GuildAttack { guild: String },
    FinishQuest { skip: bool },
    CheckNameAvailable { name: String },
    ViewGuild { guild_ident: String },
    GuildFound { name: String },
    GuildInvitePlayer { name: String },
    GuildKickPlayer { name: String },
    GuildSetLeader { name: String },
    GuildToggleOfficer { name: String },
    MessageOpen { pos: i32 },
    MessageDelete { pos: i32 },
    ViewPet { pet_id: u16 },
    GambleSilver { amount: u64 },
    GambleMushrooms { amount: u64 },
    SendMessage { to: String, msg: String },
    Whisper { player_name: String, message: String },
    SetLanguage { language: String },
    FortressNewEnemy { use_mushroom: bool },
    FortressSetCaEnemy { msg_id: u32 },
    GuildPetBattle { use_mushroom: bool },
    HallOfFameGroupPage { page: u32 },
    HallOfFameUnderworldPage { page: u32 },
    HallOfFamePetsPage { page: u32 },
    BlockGuildInvites { block_invites: bool },
    ShowTips { show_tips: bool },
    UnlockFeature { main_ident: i64, sub_ident: i64 },
    ExpeditionStart { pos: usize },
    ExpeditionPickEncounter { pos: usize },
    ExpeditionPickReward { pos: usize },
    HallOfFameHellevatorPage { page: usize },
    ClaimablePreview { msg_id: i64 },
    ClaimableClaim { msg_id: i64 },
    HellevatorJoinHellAttack { use_mushroom: bool, plain: usize },
    HellevatorFight { use_mushroom: bool },
    FortressGemStoneSearchFinish { mushrooms: u32 },
    FortressAttack { soldiers: u32 },
    FortressGatherSecretStorage { stone: usize, wood: usize },

    // -- Vocabulary arguments --
    FortressBuild { building: FortressBuildingType },
    FortressBuildCancel { building: FortressBuildingType },
    FortressBuildFinish { building: FortressBuildingType, mushrooms: u32 },
    FortressBuildUnit { unit: FortressUnitType, count: u32 },
    FortressGather { resource: FortressResourceType },
    UnderworldCollect { resource: UnderworldResourceType },
    UnderworldUnitUpgrade { unit: UnderworldUnitType },
    UnderworldUpgradeCancel { unit: UnderworldUnitType },
    UnderworldUpgradeFinish { building: UnderworldBuildingType, mushrooms: u32 },
    SpinWheelOfFortune { payment: FortunePaymentType },
    BuyMount { mount: MountType },
    IncreaseAttribute { attribute: AttributeType, increase_to: u32 },
    GuildIncreaseSkill { skill: GuildSkillType, current: u16 },
    ToiletDrop { inventory: PlayerItemPlaceType, pos: usize },
    ExpeditionSkipWait { skip: TimeSkipType },
    HellevatorBuy {
        position: usize,
        treat: HellevatorTreatType,
        price: u32,
        use_mushroom: bool,
    },
}

impl Command {
    /// The largest hour count `StartWork` can carry (one byte).
    pub const MAX_WORK_HOURS: u16 = u8::MAX as u16;

    /// Builds a `StartWork` command from a wider hour count.
    ///
    /// # Errors
    /// Returns [`ArgumentError::OutOfRange`] if `hours` exceeds
    /// [`Self::MAX_WORK_HOURS`].
    pub fn start_work(hours: u16) -> Result<Self, ArgumentError> {
        let hours = u8::try_from(hours).map_err(|_| ArgumentError::OutOfRange {
            argument: "hours",
            value: u64::from(hours),
            max: u64::from(Self::MAX_WORK_HOURS),
        })?;
        Ok(Self::StartWork { hours })
    }

    /// Returns the catalog identifier of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Update => CommandKind::Update,
            Self::BuyBeer => CommandKind::BuyBeer,
            Self::CancelQuest => CommandKind::CancelQuest,
            Self::FinishWork => CommandKind::FinishWork,
            Self::CheckArena => CommandKind::CheckArena,
            Self::CollectCalendar => CommandKind::CollectCalendar,
            Self::ToiletFlush => CommandKind::ToiletFlush,
            Self::ToiletOpen => CommandKind::ToiletOpen,
            Self::CancelWork => CommandKind::CancelWork,
            Self::GuildLoadMushrooms => CommandKind::GuildLoadMushrooms,
            Self::GuildJoinAttack => CommandKind::GuildJoinAttack,
            Self::GuildJoinDefense => CommandKind::GuildJoinDefense,
            Self::GuildRaid => CommandKind::GuildRaid,
            Self::GuildPortalBattle => CommandKind::GuildPortalBattle,
            Self::GuildGetFightableTargets => {
                CommandKind::GuildGetFightableTargets
            }
            Self::ViewScrapbook => CommandKind::ViewScrapbook,
            Self::FightPortal => CommandKind::FightPortal,
            Self::SwapManequin => CommandKind::SwapManequin,
            Self::IdleSacrifice => CommandKind::IdleSacrifice,
            Self::HellevatorEnter => CommandKind::HellevatorEnter,
            Self::HellevatorViewGuildRanking => {
                CommandKind::HellevatorViewGuildRanking
            }
            Self::HellevatorRefreshShop => CommandKind::HellevatorRefreshShop,
            Self::HellevatorClaimDaily => CommandKind::HellevatorClaimDaily,
            Self::HellevatorClaimDailyYesterday => {
                CommandKind::HellevatorClaimDailyYesterday
            }
            Self::HellevatorClaimFinal => CommandKind::HellevatorClaimFinal,
            Self::HellevatorPreviewRewards => {
                CommandKind::HellevatorPreviewRewards
            }
            Self::BuyGoldFrame => CommandKind::BuyGoldFrame,
            Self::FortressGemStoneSearch => CommandKind::FortressGemStoneSearch,
            Self::FortressGemStoneSearchCancel => {
                CommandKind::FortressGemStoneSearchCancel
            }
            Self::FortressUpgradeHallOfKnights => {
                CommandKind::FortressUpgradeHallOfKnights
            }
            Self::ExpeditionContinue => CommandKind::ExpeditionContinue,

            Self::HallOfFamePage { .. } => CommandKind::HallOfFamePage,
            Self::HallOfFameFortressPage { .. } => {
                CommandKind::HallOfFameFortressPage
            }
            Self::ViewPlayer { .. } => CommandKind::ViewPlayer,
            Self::StartQuest { .. } => CommandKind::StartQuest,
            Self::StartWork { .. } => CommandKind::StartWork,
            Self::RemovePotion { .. } => CommandKind::RemovePotion,
            Self::Fight { .. } => CommandKind::Fight,
            Self::GuildAttack { .. } => CommandKind::GuildAttack,
            Self::FinishQuest { .. } => CommandKind::FinishQuest,
            Self::CheckNameAvailable { .. } => CommandKind::CheckNameAvailable,
            Self::ViewGuild { .. } => CommandKind::ViewGuild,
            Self::GuildFound { .. } => CommandKind::GuildFound,
            Self::GuildInvitePlayer { .. } => CommandKind::GuildInvitePlayer,
            Self::GuildKickPlayer { .. } => CommandKind::GuildKickPlayer,
            Self::GuildSetLeader { .. } => CommandKind::GuildSetLeader,
            Self::GuildToggleOfficer { .. } => CommandKind::GuildToggleOfficer,
            Self::MessageOpen { .. } => CommandKind::MessageOpen,
            Self::MessageDelete { .. } => CommandKind::MessageDelete,
            Self::ViewPet { .. } => CommandKind::ViewPet,
            Self::GambleSilver { .. } => CommandKind::GambleSilver,
            Self::GambleMushrooms { .. } => CommandKind::GambleMushrooms,
            Self::SendMessage { .. } => CommandKind::SendMessage,
            Self::Whisper { .. } => CommandKind::Whisper,
            Self::SetLanguage { .. } => CommandKind::SetLanguage,
            Self::FortressNewEnemy { .. } => CommandKind::FortressNewEnemy,
            Self::FortressSetCaEnemy { .. } => CommandKind::FortressSetCaEnemy,
            Self::GuildPetBattle { .. } => CommandKind::GuildPetBattle,
            Self::HallOfFameGroupPage { .. } => {
                CommandKind::HallOfFameGroupPage
            }
            Self::HallOfFameUnderworldPage { .. } => {
                CommandKind::HallOfFameUnderworldPage
            }
            Self::HallOfFamePetsPage { .. } => CommandKind::HallOfFamePetsPage,
            Self::BlockGuildInvites { .. } => CommandKind::BlockGuildInvites,
            Self::ShowTips { .. } => CommandKind::ShowTips,
            Self::UnlockFeature { .. } => CommandKind::UnlockFeature,
            Self::ExpeditionStart { .. } => CommandKind::ExpeditionStart,
            Self::ExpeditionPickEncounter { .. } => {
                CommandKind::ExpeditionPickEncounter
            }
            Self::ExpeditionPickReward { .. } => {
                CommandKind::ExpeditionPickReward
            }
            Self::HallOfFameHellevatorPage { .. } => {
                CommandKind::HallOfFameHellevatorPage
            }
            Self::ClaimablePreview { .. } => CommandKind::ClaimablePreview,
            Self::ClaimableClaim { .. } => CommandKind::ClaimableClaim,
            Self::HellevatorJoinHellAttack { .. } => {
                CommandKind::HellevatorJoinHellAttack
            }
            Self::HellevatorFight { .. } => CommandKind::HellevatorFight,
            Self::FortressGemStoneSearchFinish { .. } => {
                CommandKind::FortressGemStoneSearchFinish
            }
            Self::FortressAttack { .. } => CommandKind::FortressAttack,
            Self::FortressGatherSecretStorage { .. } => {
                CommandKind::FortressGatherSecretStorage
            }

            Self::FortressBuild { .. } => CommandKind::FortressBuild,
            Self::FortressBuildCancel { .. } => CommandKind::FortressBuildCancel,
            Self::FortressBuildFinish { .. } => CommandKind::FortressBuildFinish,
            Self::FortressBuildUnit { .. } => CommandKind::FortressBuildUnit,
            Self::FortressGather { .. } => CommandKind::FortressGather,
            Self::UnderworldCollect { .. } => CommandKind::UnderworldCollect,
            Self::UnderworldUnitUpgrade { .. } => {
                CommandKind::UnderworldUnitUpgrade
            }
            Self::UnderworldUpgradeCancel { .. } => {
                CommandKind::UnderworldUpgradeCancel
            }
            Self::UnderworldUpgradeFinish { .. } => {
                CommandKind::UnderworldUpgradeFinish
            }
            Self::SpinWheelOfFortune { .. } => CommandKind::SpinWheelOfFortune,
            Self::BuyMount { .. } => CommandKind::BuyMount,
            Self::IncreaseAttribute { .. } => CommandKind::IncreaseAttribute,
            Self::GuildIncreaseSkill { .. } => CommandKind::GuildIncreaseSkill,
            Self::ToiletDrop { .. } => CommandKind::ToiletDrop,
            Self::ExpeditionSkipWait { .. } => CommandKind::ExpeditionSkipWait,
            Self::HellevatorBuy { .. } => CommandKind::HellevatorBuy,
        }
    }

    /// Encodes the parameters, in declaration order.
    ///
    /// No validation happens here; see [`Command::encode`].
    pub fn args(&self) -> Vec<Arg> {
        match self {
            Self::Update
            | Self::BuyBeer
            | Self::CancelQuest
            | Self::FinishWork
            | Self::CheckArena
            | Self::CollectCalendar
            | Self::ToiletFlush
            | Self::ToiletOpen
            | Self::CancelWork
            | Self::GuildLoadMushrooms
            | Self::GuildJoinAttack
            | Self::GuildJoinDefense
            | Self::GuildRaid
            | Self::GuildPortalBattle
            | Self::GuildGetFightableTargets
            | Self::ViewScrapbook
            | Self::FightPortal
            | Self::SwapManequin
            | Self::IdleSacrifice
            | Self::HellevatorEnter
            | Self::HellevatorViewGuildRanking
            | Self::HellevatorRefreshShop
            | Self::HellevatorClaimDaily
            | Self::HellevatorClaimDailyYesterday
            | Self::HellevatorClaimFinal
            | Self::HellevatorPreviewRewards
            | Self::BuyGoldFrame
            | Self::FortressGemStoneSearch
            | Self::FortressGemStoneSearchCancel
            | Self::FortressUpgradeHallOfKnights
            | Self::ExpeditionContinue => Vec::new(),

            Self::HallOfFamePage { page }
            | Self::HallOfFameFortressPage { page }
            | Self::HallOfFameHellevatorPage { page } => {
                vec![Arg::index(*page)]
            }
            Self::HallOfFameGroupPage { page }
            | Self::HallOfFameUnderworldPage { page }
            | Self::HallOfFamePetsPage { page } => vec![Arg::U32(*page)],

            Self::RemovePotion { pos }
            | Self::ExpeditionStart { pos }
            | Self::ExpeditionPickEncounter { pos }
            | Self::ExpeditionPickReward { pos } => vec![Arg::index(*pos)],

            Self::MessageOpen { pos } | Self::MessageDelete { pos } => {
                vec![Arg::I32(*pos)]
            }

            Self::ViewPlayer { ident } => vec![Arg::text(ident)],
            Self::ViewGuild { guild_ident } => vec![Arg::text(guild_ident)],
            Self::GuildAttack { guild } => vec![Arg::text(guild)],
            Self::SetLanguage { language } => vec![Arg::text(language)],
            Self::CheckNameAvailable { name }
            | Self::GuildFound { name }
            | Self::GuildInvitePlayer { name }
            | Self::GuildKickPlayer { name }
            | Self::GuildSetLeader { name }
            | Self::GuildToggleOfficer { name } => vec![Arg::text(name)],

            Self::StartQuest {
                quest_pos,
                overwrite_inv,
            } => vec![Arg::index(*quest_pos), Arg::Bool(*overwrite_inv)],
            Self::StartWork { hours } => vec![Arg::U8(*hours)],
            Self::Fight { name, use_mushroom } => {
                vec![Arg::text(name), Arg::Bool(*use_mushroom)]
            }
            Self::FinishQuest { skip } => vec![Arg::Bool(*skip)],
            Self::ViewPet { pet_id } => vec![Arg::U16(*pet_id)],
            Self::GambleSilver { amount } | Self::GambleMushrooms { amount } => {
                vec![Arg::U64(*amount)]
            }
            Self::SendMessage { to, msg } => {
                vec![Arg::text(to), Arg::text(msg)]
            }
            Self::Whisper {
                player_name,
                message,
            } => vec![Arg::text(player_name), Arg::text(message)],
            Self::FortressNewEnemy { use_mushroom }
            | Self::GuildPetBattle { use_mushroom }
            | Self::HellevatorFight { use_mushroom } => {
                vec![Arg::Bool(*use_mushroom)]
            }
            Self::FortressSetCaEnemy { msg_id } => vec![Arg::U32(*msg_id)],
            Self::BlockGuildInvites { block_invites } => {
                vec![Arg::Bool(*block_invites)]
            }
            Self::ShowTips { show_tips } => vec![Arg::Bool(*show_tips)],
            Self::UnlockFeature {
                main_ident,
                sub_ident,
            } => vec![Arg::I64(*main_ident), Arg::I64(*sub_ident)],
            Self::ClaimablePreview { msg_id } | Self::ClaimableClaim { msg_id } => {
                vec![Arg::I64(*msg_id)]
            }
            Self::HellevatorJoinHellAttack {
                use_mushroom,
                plain,
            } => vec![Arg::Bool(*use_mushroom), Arg::index(*plain)],
            Self::FortressGemStoneSearchFinish { mushrooms } => {
                vec![Arg::U32(*mushrooms)]
            }
            Self::FortressAttack { soldiers } => vec![Arg::U32(*soldiers)],
            Self::FortressGatherSecretStorage { stone, wood } => {
                vec![Arg::index(*stone), Arg::index(*wood)]
            }

            Self::FortressBuild { building }
            | Self::FortressBuildCancel { building } => {
                vec![Arg::U8(building.wire_code())]
            }
            Self::FortressBuildFinish {
                building,
                mushrooms,
            } => vec![Arg::U8(building.wire_code()), Arg::U32(*mushrooms)],
            Self::FortressBuildUnit { unit, count } => {
                vec![Arg::U8(unit.wire_code()), Arg::U32(*count)]
            }
            Self::FortressGather { resource } => {
                vec![Arg::U8(resource.wire_code())]
            }
            Self::UnderworldCollect { resource } => {
                vec![Arg::U8(resource.wire_code())]
            }
            Self::UnderworldUnitUpgrade { unit }
            | Self::UnderworldUpgradeCancel { unit } => {
                vec![Arg::U8(unit.wire_code())]
            }
            Self::UnderworldUpgradeFinish {
                building,
                mushrooms,
            } => vec![Arg::U8(building.wire_code()), Arg::U32(*mushrooms)],
            Self::SpinWheelOfFortune { payment } => {
                vec![Arg::U8(payment.wire_code())]
            }
            Self::BuyMount { mount } => vec![Arg::U8(mount.wire_code())],
            Self::IncreaseAttribute {
                attribute,
                increase_to,
            } => vec![Arg::U8(attribute.wire_code()), Arg::U32(*increase_to)],
            Self::GuildIncreaseSkill { skill, current } => {
                vec![Arg::U8(skill.wire_code()), Arg::U16(*current)]
            }
            Self::ToiletDrop { inventory, pos } => {
                vec![Arg::U8(inventory.wire_code()), Arg::index(*pos)]
            }
            Self::ExpeditionSkipWait { skip } => vec![Arg::U8(skip.wire_code())],
            Self::HellevatorBuy {
                position,
                treat,
                price,
                use_mushroom,
            } => vec![
                Arg::index(*position),
                Arg::U8(treat.wire_code()),
                Arg::U32(*price),
                Arg::Bool(*use_mushroom),
            ],
        }
    }

    /// Encodes the command without checking its arguments.
    ///
    /// Only use this for commands whose parameter types already rule out
    /// bad values (no strings). Everything else goes through
    /// [`Command::encode`].
    pub fn invocation(&self) -> Invocation {
        Invocation {
            command: self.kind(),
            args: self.args(),
        }
    }

    /// Validates and encodes the command.
    ///
    /// # Errors
    /// Returns [`ArgumentError::InteriorNul`] if a string argument contains
    /// a NUL byte.
    pub fn encode(&self) -> Result<Invocation, ArgumentError> {
        let invocation = self.invocation();
        let bad = invocation
            .args
            .iter()
            .position(|arg| matches!(arg, Arg::Str(s) if s.contains('\0')));
        if let Some(position) = bad {
            return Err(ArgumentError::InteriorNul {
                command: invocation.command,
                position,
            });
        }
        Ok(invocation)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    // =====================================================================
    // CommandKind
    // =====================================================================

    #[test]
    fn test_command_kind_opcodes_are_distinct() {
        let opcodes: HashSet<u16> =
            CommandKind::ALL.iter().map(|k| k.opcode()).collect();
        assert_eq!(opcodes.len(), CommandKind::ALL.len());
    }

    #[test]
    fn test_command_kind_catalog_size() {
        // 31 parameterless, 44 primitive, 16 vocabulary.
        assert_eq!(CommandKind::ALL.len(), 91);
    }

    #[test]
    fn test_command_kind_opcode_decodes_back() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::try_from(kind.opcode()).unwrap(), *kind);
        }
    }

    #[test]
    fn test_command_kind_unknown_opcode_returns_error() {
        assert!(CommandKind::try_from(0_u16).is_err());
        assert!(CommandKind::try_from(99_u16).is_err());
        assert!(CommandKind::try_from(216_u16).is_err());
    }

    /// Every opcode as it goes over the wire. Changing one breaks callers
    /// built against the old table.
    const OPCODES: [(CommandKind, u16); 91] = [
        (CommandKind::Update, 1),
        (CommandKind::BuyBeer, 2),
        (CommandKind::CancelQuest, 3),
        (CommandKind::FinishWork, 4),
        (CommandKind::CheckArena, 5),
        (CommandKind::CollectCalendar, 6),
        (CommandKind::ToiletFlush, 7),
        (CommandKind::ToiletOpen, 8),
        (CommandKind::CancelWork, 9),
        (CommandKind::GuildLoadMushrooms, 10),
        (CommandKind::GuildJoinAttack, 11),
        (CommandKind::GuildJoinDefense, 12),
        (CommandKind::GuildRaid, 13),
        (CommandKind::GuildPortalBattle, 14),
        (CommandKind::GuildGetFightableTargets, 15),
        (CommandKind::ViewScrapbook, 16),
        (CommandKind::FightPortal, 17),
        (CommandKind::SwapManequin, 18),
        (CommandKind::IdleSacrifice, 19),
        (CommandKind::HellevatorEnter, 20),
        (CommandKind::HellevatorViewGuildRanking, 21),
        (CommandKind::HellevatorRefreshShop, 22),
        (CommandKind::HellevatorClaimDaily, 23),
        (CommandKind::HellevatorClaimDailyYesterday, 24),
        (CommandKind::HellevatorClaimFinal, 25),
        (CommandKind::HellevatorPreviewRewards, 26),
        (CommandKind::BuyGoldFrame, 27),
        (CommandKind::FortressGemStoneSearch, 28),
        (CommandKind::FortressGemStoneSearchCancel, 29),
        (CommandKind::FortressUpgradeHallOfKnights, 30),
        (CommandKind::ExpeditionContinue, 31),
        (CommandKind::HallOfFamePage, 100),
        (CommandKind::HallOfFameFortressPage, 101),
        (CommandKind::ViewPlayer, 102),
        (CommandKind::StartQuest, 103),
        (CommandKind::StartWork, 104),
        (CommandKind::RemovePotion, 105),
        (CommandKind::Fight, 106),
        (CommandKind::GuildAttack, 107),
        (CommandKind::FinishQuest, 108),
        (CommandKind::CheckNameAvailable, 109),
        (CommandKind::ViewGuild, 110),
        (CommandKind::GuildFound, 111),
        (CommandKind::GuildInvitePlayer, 112),
        (CommandKind::GuildKickPlayer, 113),
        (CommandKind::GuildSetLeader, 114),
        (CommandKind::GuildToggleOfficer, 115),
        (CommandKind::MessageOpen, 116),
        (CommandKind::MessageDelete, 117),
        (CommandKind::ViewPet, 118),
        (CommandKind::GambleSilver, 119),
        (CommandKind::GambleMushrooms, 120),
        (CommandKind::SendMessage, 121),
        (CommandKind::Whisper, 122),
        (CommandKind::SetLanguage, 123),
        (CommandKind::FortressNewEnemy, 124),
        (CommandKind::FortressSetCaEnemy, 125),
        (CommandKind::GuildPetBattle, 126),
        (CommandKind::HallOfFameGroupPage, 127),
        (CommandKind::HallOfFameUnderworldPage, 128),
        (CommandKind::HallOfFamePetsPage, 129),
        (CommandKind::BlockGuildInvites, 130),
        (CommandKind::ShowTips, 131),
        (CommandKind::UnlockFeature, 132),
        (CommandKind::ExpeditionStart, 133),
        (CommandKind::ExpeditionPickEncounter, 134),
        (CommandKind::ExpeditionPickReward, 135),
        (CommandKind::HallOfFameHellevatorPage, 136),
        (CommandKind::ClaimablePreview, 137),
        (CommandKind::ClaimableClaim, 138),
        (CommandKind::HellevatorJoinHellAttack, 139),
        (CommandKind::HellevatorFight, 140),
        (CommandKind::FortressGemStoneSearchFinish, 141),
        (CommandKind::FortressAttack, 142),
        (CommandKind::FortressGatherSecretStorage, 143),
        (CommandKind::FortressBuild, 200),
        (CommandKind::FortressBuildCancel, 201),
        (CommandKind::FortressBuildFinish, 202),
        (CommandKind::FortressBuildUnit, 203),
        (CommandKind::FortressGather, 204),
        (CommandKind::UnderworldCollect, 205),
        (CommandKind::UnderworldUnitUpgrade, 206),
        (CommandKind::UnderworldUpgradeCancel, 207),
        (CommandKind::UnderworldUpgradeFinish, 208),
        (CommandKind::SpinWheelOfFortune, 209),
        (CommandKind::BuyMount, 210),
        (CommandKind::IncreaseAttribute, 211),
        (CommandKind::GuildIncreaseSkill, 212),
        (CommandKind::ToiletDrop, 213),
        (CommandKind::ExpeditionSkipWait, 214),
        (CommandKind::HellevatorBuy, 215),
    ];

    #[test]
    fn test_command_kind_opcodes_match_wire_table() {
        for (kind, opcode) in OPCODES {
            assert_eq!(kind.opcode(), opcode, "{kind}");
            assert_eq!(CommandKind::try_from(opcode).unwrap(), kind, "{opcode}");
        }
    }

    #[test]
    fn test_command_kind_wire_table_covers_catalog() {
        let listed: HashSet<CommandKind> = OPCODES.iter().map(|(kind, _)| *kind).collect();
        let catalog: HashSet<CommandKind> = CommandKind::ALL.iter().copied().collect();
        assert_eq!(OPCODES.len(), CommandKind::ALL.len());
        assert_eq!(listed, catalog);
    }

    // =====================================================================
    // start_work()
    // =====================================================================

    #[test]
    fn test_start_work_accepts_byte_range() {
        assert_eq!(
            Command::start_work(0).unwrap(),
            Command::StartWork { hours: 0 }
        );
        assert_eq!(
            Command::start_work(255).unwrap(),
            Command::StartWork { hours: 255 }
        );
    }

    #[test]
    fn test_start_work_above_one_byte_returns_out_of_range() {
        let err = Command::start_work(256).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::OutOfRange {
                argument: "hours",
                value: 256,
                max: 255,
            }
        );
    }

    // =====================================================================
    // args() / encode()
    // =====================================================================

    #[test]
    fn test_parameterless_command_has_no_args() {
        let invocation = Command::Update.encode().unwrap();
        assert_eq!(invocation.command, CommandKind::Update);
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn test_page_index_travels_as_u64() {
        let invocation = Command::HallOfFamePage { page: 3 }.encode().unwrap();
        assert_eq!(invocation.args, vec![Arg::U64(3)]);
    }

    #[test]
    fn test_vocabulary_argument_uses_wire_code() {
        let args = Command::ToiletDrop {
            inventory: PlayerItemPlaceType::ExtendedInventory,
            pos: 4,
        }
        .args();
        assert_eq!(args, vec![Arg::U8(5), Arg::U64(4)]);

        let args = Command::IncreaseAttribute {
            attribute: AttributeType::Strength,
            increase_to: 10,
        }
        .args();
        assert_eq!(args, vec![Arg::U8(1), Arg::U32(10)]);
    }

    #[test]
    fn test_hellevator_buy_keeps_parameter_order() {
        let args = Command::HellevatorBuy {
            position: 2,
            treat: HellevatorTreatType::LavaSausage,
            price: 150,
            use_mushroom: true,
        }
        .args();
        assert_eq!(
            args,
            vec![Arg::U64(2), Arg::U8(3), Arg::U32(150), Arg::Bool(true)]
        );
    }

    #[test]
    fn test_encode_rejects_nul_in_string_argument() {
        let err = Command::SendMessage {
            to: "bob".into(),
            msg: "hi\0there".into(),
        }
        .encode()
        .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::InteriorNul {
                command: CommandKind::SendMessage,
                position: 1,
            }
        );
    }

    #[test]
    fn test_encode_accepts_empty_string() {
        // Empty is structurally fine; whether the server likes it is
        // the server's business.
        let invocation = Command::ViewPlayer {
            ident: String::new(),
        }
        .encode()
        .unwrap();
        assert_eq!(invocation.args, vec![Arg::Str(String::new())]);
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Command::FortressBuildUnit {
                unit: FortressUnitType::Archer,
                count: 5,
            }
            .kind(),
            CommandKind::FortressBuildUnit
        );
        assert_eq!(
            Command::Whisper {
                player_name: "a".into(),
                message: "b".into(),
            }
            .kind(),
            CommandKind::Whisper
        );
    }

    // =====================================================================
    // Invocation JSON shape
    // =====================================================================

    #[test]
    fn test_invocation_json_uses_opcode_and_tagged_args() {
        let invocation = Command::BuyMount {
            mount: MountType::Dragon,
        }
        .encode()
        .unwrap();
        let json = serde_json::to_value(&invocation).unwrap();

        assert_eq!(json["command"], 210);
        assert_eq!(json["args"][0]["type"], "U8");
        assert_eq!(json["args"][0]["value"], 4);
    }

    #[test]
    fn test_invocation_with_unknown_opcode_fails_to_decode() {
        let raw = r#"{"command": 999, "args": []}"#;
        let result: Result<Invocation, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
