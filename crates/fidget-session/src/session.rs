//! The authenticated session and the command catalog as methods.
//!
//! A [`Session`] only exists in one state: connected and logged in.
//! Construction performs both steps through the collaborator and returns
//! `Err` if either fails, so there is never a half-open session to guard
//! against. Dropping the session gives the connection back.
//!
//! ```text
//!   Session::connect ──ok──▶ Active ──drop──▶ (released)
//!          │
//!          └──err──▶ SessionError (no session, nothing to release)
//! ```
//!
//! ## Method shapes
//!
//! Every catalog command is a method. They come in two return shapes:
//!
//! - Commands whose arguments can't be wrong return a
//!   [`CommandResponse`] directly.
//! - Commands that take a string, plus `start_work`, return
//!   `Result<CommandResponse, ArgumentError>`. The check runs before the
//!   collaborator is contacted.
//!
//! A command that fails on the server side is not an `Err`: it yields an
//! invalid response, and the session stays usable.

use std::cell::Cell;
use std::marker::PhantomData;

use fidget_protocol::{
    ArgumentError, AttributeType, Command, FortressBuildingType, FortressResourceType,
    FortressUnitType, FortunePaymentType, GuildSkillType, HellevatorTreatType, Invocation,
    MountType, PlayerItemPlaceType, TimeSkipType, UnderworldBuildingType,
    UnderworldResourceType, UnderworldUnitType,
};
use fidget_transport::{ConnectionHandle, Credentials, Transport};

use crate::{CommandResponse, SessionError};

/// An authenticated connection to the game server.
///
/// Not `Clone`, not `Sync`: commands on one session run strictly one
/// after another. A session can be moved to another thread when its
/// transport can.
pub struct Session<T: Transport> {
    transport: T,
    /// `Some` for the whole life of the session. Only `Drop` takes it,
    /// so no method ever observes `None`.
    connection: Option<ConnectionHandle>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T: Transport> Session<T> {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Connects and authenticates with ready-made credentials.
    ///
    /// # Errors
    /// - [`SessionError::CreationFailed`] if the server can't be reached
    /// - [`SessionError::AuthenticationRejected`] if the login is refused
    pub fn connect(transport: T, credentials: &Credentials) -> Result<Self, SessionError> {
        let connection = transport
            .open_and_authenticate(credentials)
            .map_err(|failure| {
                tracing::warn!(
                    username = credentials.username(),
                    server = %credentials.server(),
                    %failure,
                    "session could not be opened"
                );
                SessionError::from(failure)
            })?;

        tracing::info!(
            %connection,
            username = credentials.username(),
            server = %credentials.server(),
            "session opened"
        );
        Ok(Self {
            transport,
            connection: Some(connection),
            _not_sync: PhantomData,
        })
    }

    /// Connects and authenticates with a username, password and server
    /// address.
    ///
    /// # Errors
    /// As [`Session::connect`]. An empty username is reported as
    /// [`SessionError::AuthenticationRejected`], a malformed address as
    /// [`SessionError::CreationFailed`].
    pub fn login(
        transport: T,
        username: &str,
        password: &str,
        server: &str,
    ) -> Result<Self, SessionError> {
        let credentials = Credentials::new(username, password, server)?;
        Self::connect(transport, &credentials)
    }

    /// Connects with credentials read from the `FIDGET_*` environment
    /// variables.
    pub fn from_env(transport: T) -> Result<Self, SessionError> {
        let credentials = Credentials::from_env()?;
        Self::connect(transport, &credentials)
    }

    /// The collaborator this session runs on.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Validates and runs any catalog command.
    ///
    /// # Errors
    /// Returns an [`ArgumentError`] if an argument fails its check. The
    /// collaborator is not contacted in that case.
    pub fn execute(&self, command: Command) -> Result<CommandResponse<'_, T>, ArgumentError> {
        let invocation = command.encode()?;
        Ok(self.dispatch(invocation))
    }

    /// Runs a command whose argument types leave nothing to check.
    fn send(&self, command: Command) -> CommandResponse<'_, T> {
        self.dispatch(command.invocation())
    }

    fn dispatch(&self, invocation: Invocation) -> CommandResponse<'_, T> {
        let command = invocation.command;
        let Some(connection) = self.connection.as_ref() else {
            // Unreachable while `&self` is borrowed: only `Drop` clears the
            // handle. Answer with an invalid response rather than panic.
            return CommandResponse::failed(&self.transport, command, "session closed".into());
        };

        match self.transport.invoke(connection, &invocation) {
            Ok(result) => {
                tracing::debug!(%connection, %command, %result, "command succeeded");
                CommandResponse::succeeded(&self.transport, command, result)
            }
            Err(e) => {
                tracing::warn!(%connection, %command, error = %e, "command failed");
                CommandResponse::failed(&self.transport, command, e.to_string())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Character
    // -----------------------------------------------------------------------

    /// Refreshes the full character state.
    pub fn update(&self) -> CommandResponse<'_, T> {
        self.send(Command::Update)
    }

    pub fn buy_beer(&self) -> CommandResponse<'_, T> {
        self.send(Command::BuyBeer)
    }

    pub fn cancel_quest(&self) -> CommandResponse<'_, T> {
        self.send(Command::CancelQuest)
    }

    pub fn finish_work(&self) -> CommandResponse<'_, T> {
        self.send(Command::FinishWork)
    }

    pub fn check_arena(&self) -> CommandResponse<'_, T> {
        self.send(Command::CheckArena)
    }

    pub fn collect_calendar(&self) -> CommandResponse<'_, T> {
        self.send(Command::CollectCalendar)
    }

    pub fn cancel_work(&self) -> CommandResponse<'_, T> {
        self.send(Command::CancelWork)
    }

    pub fn view_scrapbook(&self) -> CommandResponse<'_, T> {
        self.send(Command::ViewScrapbook)
    }

    pub fn fight_portal(&self) -> CommandResponse<'_, T> {
        self.send(Command::FightPortal)
    }

    pub fn swap_manequin(&self) -> CommandResponse<'_, T> {
        self.send(Command::SwapManequin)
    }

    pub fn idle_sacrifice(&self) -> CommandResponse<'_, T> {
        self.send(Command::IdleSacrifice)
    }

    pub fn buy_gold_frame(&self) -> CommandResponse<'_, T> {
        self.send(Command::BuyGoldFrame)
    }

    /// Starts the quest at `quest_pos` (0-based) in the tavern.
    pub fn start_quest(&self, quest_pos: usize, overwrite_inv: bool) -> CommandResponse<'_, T> {
        self.send(Command::StartQuest {
            quest_pos,
            overwrite_inv,
        })
    }

    /// Starts a shift in the city guard.
    ///
    /// # Errors
    /// [`ArgumentError::OutOfRange`] if `hours` is above 255. Nothing is
    /// sent in that case.
    pub fn start_work(&self, hours: u16) -> Result<CommandResponse<'_, T>, ArgumentError> {
        let command = Command::start_work(hours)?;
        Ok(self.send(command))
    }

    pub fn remove_potion(&self, pos: usize) -> CommandResponse<'_, T> {
        self.send(Command::RemovePotion { pos })
    }

    pub fn finish_quest(&self, skip: bool) -> CommandResponse<'_, T> {
        self.send(Command::FinishQuest { skip })
    }

    pub fn view_pet(&self, pet_id: u16) -> CommandResponse<'_, T> {
        self.send(Command::ViewPet { pet_id })
    }

    pub fn gamble_silver(&self, amount: u64) -> CommandResponse<'_, T> {
        self.send(Command::GambleSilver { amount })
    }

    pub fn gamble_mushrooms(&self, amount: u64) -> CommandResponse<'_, T> {
        self.send(Command::GambleMushrooms { amount })
    }

    pub fn show_tips(&self, show_tips: bool) -> CommandResponse<'_, T> {
        self.send(Command::ShowTips { show_tips })
    }

    pub fn unlock_feature(&self, main_ident: i64, sub_ident: i64) -> CommandResponse<'_, T> {
        self.send(Command::UnlockFeature {
            main_ident,
            sub_ident,
        })
    }

    pub fn spin_wheel_of_fortune(&self, payment: FortunePaymentType) -> CommandResponse<'_, T> {
        self.send(Command::SpinWheelOfFortune { payment })
    }

    pub fn buy_mount(&self, mount: MountType) -> CommandResponse<'_, T> {
        self.send(Command::BuyMount { mount })
    }

    /// Raises `attribute` to `increase_to` points.
    pub fn increase_attribute(
        &self,
        attribute: AttributeType,
        increase_to: u32,
    ) -> CommandResponse<'_, T> {
        self.send(Command::IncreaseAttribute {
            attribute,
            increase_to,
        })
    }

    // -----------------------------------------------------------------------
    // Players and messages
    // -----------------------------------------------------------------------

    /// Looks up a player by name or id.
    pub fn view_player(&self, ident: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::ViewPlayer {
            ident: ident.to_owned(),
        })
    }

    /// Attacks `name` in the arena.
    pub fn fight(
        &self,
        name: &str,
        use_mushroom: bool,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::Fight {
            name: name.to_owned(),
            use_mushroom,
        })
    }

    pub fn check_name_available(
        &self,
        name: &str,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::CheckNameAvailable {
            name: name.to_owned(),
        })
    }

    pub fn message_open(&self, pos: i32) -> CommandResponse<'_, T> {
        self.send(Command::MessageOpen { pos })
    }

    pub fn message_delete(&self, pos: i32) -> CommandResponse<'_, T> {
        self.send(Command::MessageDelete { pos })
    }

    pub fn send_message(
        &self,
        to: &str,
        msg: &str,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::SendMessage {
            to: to.to_owned(),
            msg: msg.to_owned(),
        })
    }

    pub fn whisper(
        &self,
        player_name: &str,
        message: &str,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::Whisper {
            player_name: player_name.to_owned(),
            message: message.to_owned(),
        })
    }

    pub fn set_language(&self, language: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::SetLanguage {
            language: language.to_owned(),
        })
    }

    pub fn claimable_preview(&self, msg_id: i64) -> CommandResponse<'_, T> {
        self.send(Command::ClaimablePreview { msg_id })
    }

    pub fn claimable_claim(&self, msg_id: i64) -> CommandResponse<'_, T> {
        self.send(Command::ClaimableClaim { msg_id })
    }

    // -----------------------------------------------------------------------
    // Hall of fame
    // -----------------------------------------------------------------------

    /// Loads one page of the player ranking.
    pub fn hall_of_fame_page(&self, page: usize) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFamePage { page })
    }

    pub fn hall_of_fame_fortress_page(&self, page: usize) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFameFortressPage { page })
    }

    pub fn hall_of_fame_group_page(&self, page: u32) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFameGroupPage { page })
    }

    pub fn hall_of_fame_underworld_page(&self, page: u32) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFameUnderworldPage { page })
    }

    pub fn hall_of_fame_pets_page(&self, page: u32) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFamePetsPage { page })
    }

    pub fn hall_of_fame_hellevator_page(&self, page: usize) -> CommandResponse<'_, T> {
        self.send(Command::HallOfFameHellevatorPage { page })
    }

    // -----------------------------------------------------------------------
    // Guild
    // -----------------------------------------------------------------------

    pub fn guild_load_mushrooms(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildLoadMushrooms)
    }

    pub fn guild_join_attack(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildJoinAttack)
    }

    pub fn guild_join_defense(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildJoinDefense)
    }

    pub fn guild_raid(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildRaid)
    }

    pub fn guild_portal_battle(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildPortalBattle)
    }

    pub fn guild_get_fightable_targets(&self) -> CommandResponse<'_, T> {
        self.send(Command::GuildGetFightableTargets)
    }

    pub fn guild_attack(&self, guild: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildAttack {
            guild: guild.to_owned(),
        })
    }

    pub fn view_guild(&self, guild_ident: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::ViewGuild {
            guild_ident: guild_ident.to_owned(),
        })
    }

    pub fn guild_found(&self, name: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildFound {
            name: name.to_owned(),
        })
    }

    pub fn guild_invite_player(
        &self,
        name: &str,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildInvitePlayer {
            name: name.to_owned(),
        })
    }

    pub fn guild_kick_player(&self, name: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildKickPlayer {
            name: name.to_owned(),
        })
    }

    pub fn guild_set_leader(&self, name: &str) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildSetLeader {
            name: name.to_owned(),
        })
    }

    pub fn guild_toggle_officer(
        &self,
        name: &str,
    ) -> Result<CommandResponse<'_, T>, ArgumentError> {
        self.execute(Command::GuildToggleOfficer {
            name: name.to_owned(),
        })
    }

    pub fn guild_pet_battle(&self, use_mushroom: bool) -> CommandResponse<'_, T> {
        self.send(Command::GuildPetBattle { use_mushroom })
    }

    pub fn block_guild_invites(&self, block_invites: bool) -> CommandResponse<'_, T> {
        self.send(Command::BlockGuildInvites { block_invites })
    }

    pub fn guild_increase_skill(
        &self,
        skill: GuildSkillType,
        current: u16,
    ) -> CommandResponse<'_, T> {
        self.send(Command::GuildIncreaseSkill { skill, current })
    }

    // -----------------------------------------------------------------------
    // Toilet
    // -----------------------------------------------------------------------

    pub fn toilet_flush(&self) -> CommandResponse<'_, T> {
        self.send(Command::ToiletFlush)
    }

    pub fn toilet_open(&self) -> CommandResponse<'_, T> {
        self.send(Command::ToiletOpen)
    }

    /// Drops the item at `pos` of `inventory` into the toilet.
    pub fn toilet_drop(
        &self,
        inventory: PlayerItemPlaceType,
        pos: usize,
    ) -> CommandResponse<'_, T> {
        self.send(Command::ToiletDrop { inventory, pos })
    }

    // -----------------------------------------------------------------------
    // Fortress
    // -----------------------------------------------------------------------

    pub fn fortress_build(&self, building: FortressBuildingType) -> CommandResponse<'_, T> {
        self.send(Command::FortressBuild { building })
    }

    pub fn fortress_build_cancel(&self, building: FortressBuildingType) -> CommandResponse<'_, T> {
        self.send(Command::FortressBuildCancel { building })
    }

    pub fn fortress_build_finish(
        &self,
        building: FortressBuildingType,
        mushrooms: u32,
    ) -> CommandResponse<'_, T> {
        self.send(Command::FortressBuildFinish {
            building,
            mushrooms,
        })
    }

    pub fn fortress_build_unit(
        &self,
        unit: FortressUnitType,
        count: u32,
    ) -> CommandResponse<'_, T> {
        self.send(Command::FortressBuildUnit { unit, count })
    }

    pub fn fortress_gather(&self, resource: FortressResourceType) -> CommandResponse<'_, T> {
        self.send(Command::FortressGather { resource })
    }

    pub fn fortress_gather_secret_storage(
        &self,
        stone: usize,
        wood: usize,
    ) -> CommandResponse<'_, T> {
        self.send(Command::FortressGatherSecretStorage { stone, wood })
    }

    pub fn fortress_attack(&self, soldiers: u32) -> CommandResponse<'_, T> {
        self.send(Command::FortressAttack { soldiers })
    }

    pub fn fortress_new_enemy(&self, use_mushroom: bool) -> CommandResponse<'_, T> {
        self.send(Command::FortressNewEnemy { use_mushroom })
    }

    pub fn fortress_set_ca_enemy(&self, msg_id: u32) -> CommandResponse<'_, T> {
        self.send(Command::FortressSetCaEnemy { msg_id })
    }

    pub fn fortress_gem_stone_search(&self) -> CommandResponse<'_, T> {
        self.send(Command::FortressGemStoneSearch)
    }

    pub fn fortress_gem_stone_search_cancel(&self) -> CommandResponse<'_, T> {
        self.send(Command::FortressGemStoneSearchCancel)
    }

    pub fn fortress_gem_stone_search_finish(&self, mushrooms: u32) -> CommandResponse<'_, T> {
        self.send(Command::FortressGemStoneSearchFinish { mushrooms })
    }

    pub fn fortress_upgrade_hall_of_knights(&self) -> CommandResponse<'_, T> {
        self.send(Command::FortressUpgradeHallOfKnights)
    }

    // -----------------------------------------------------------------------
    // Underworld
    // -----------------------------------------------------------------------

    pub fn underworld_collect(&self, resource: UnderworldResourceType) -> CommandResponse<'_, T> {
        self.send(Command::UnderworldCollect { resource })
    }

    pub fn underworld_unit_upgrade(&self, unit: UnderworldUnitType) -> CommandResponse<'_, T> {
        self.send(Command::UnderworldUnitUpgrade { unit })
    }

    pub fn underworld_upgrade_cancel(&self, unit: UnderworldUnitType) -> CommandResponse<'_, T> {
        self.send(Command::UnderworldUpgradeCancel { unit })
    }

    pub fn underworld_upgrade_finish(
        &self,
        building: UnderworldBuildingType,
        mushrooms: u32,
    ) -> CommandResponse<'_, T> {
        self.send(Command::UnderworldUpgradeFinish {
            building,
            mushrooms,
        })
    }

    // -----------------------------------------------------------------------
    // Expeditions
    // -----------------------------------------------------------------------

    pub fn expedition_start(&self, pos: usize) -> CommandResponse<'_, T> {
        self.send(Command::ExpeditionStart { pos })
    }

    pub fn expedition_continue(&self) -> CommandResponse<'_, T> {
        self.send(Command::ExpeditionContinue)
    }

    pub fn expedition_pick_encounter(&self, pos: usize) -> CommandResponse<'_, T> {
        self.send(Command::ExpeditionPickEncounter { pos })
    }

    pub fn expedition_pick_reward(&self, pos: usize) -> CommandResponse<'_, T> {
        self.send(Command::ExpeditionPickReward { pos })
    }

    pub fn expedition_skip_wait(&self, skip: TimeSkipType) -> CommandResponse<'_, T> {
        self.send(Command::ExpeditionSkipWait { skip })
    }

    // -----------------------------------------------------------------------
    // Hellevator
    // -----------------------------------------------------------------------

    pub fn hellevator_enter(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorEnter)
    }

    pub fn hellevator_view_guild_ranking(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorViewGuildRanking)
    }

    pub fn hellevator_refresh_shop(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorRefreshShop)
    }

    pub fn hellevator_claim_daily(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorClaimDaily)
    }

    pub fn hellevator_claim_daily_yesterday(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorClaimDailyYesterday)
    }

    pub fn hellevator_claim_final(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorClaimFinal)
    }

    pub fn hellevator_preview_rewards(&self) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorPreviewRewards)
    }

    pub fn hellevator_join_hell_attack(
        &self,
        use_mushroom: bool,
        plain: usize,
    ) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorJoinHellAttack {
            use_mushroom,
            plain,
        })
    }

    pub fn hellevator_fight(&self, use_mushroom: bool) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorFight { use_mushroom })
    }

    /// Buys the treat at `position` in the Hellevator shop.
    pub fn hellevator_buy(
        &self,
        position: usize,
        treat: HellevatorTreatType,
        price: u32,
        use_mushroom: bool,
    ) -> CommandResponse<'_, T> {
        self.send(Command::HellevatorBuy {
            position,
            treat,
            price,
            use_mushroom,
        })
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            tracing::info!(%connection, "session closed");
            self.transport.release_connection(connection);
        }
    }
}

impl<T: Transport> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}
