//! Game-object vocabulary: the enums that command arguments are built from.
//!
//! Each type here is a closed set. A `FortressBuildingType` can only ever
//! be one of the twelve buildings, so an invalid building can't be
//! represented at all, let alone sent. What matters on the wire is the
//! numeric code, and those are pinned per variant by `wire_enum!`.
//!
//! Most sets start at 0. A few don't:
//!
//! - [`MountType`] and [`AttributeType`] start at 1
//! - [`PlayerItemPlaceType`] is sparse: `{1, 2, 5}`
//! - [`TimeSkipType`] and [`HellevatorTreatType`] start at 1
//!
//! These values are part of the wire contract and must never be renumbered.

// ---------------------------------------------------------------------------
// Fortress
// ---------------------------------------------------------------------------

wire_enum! {
    /// A building that can be constructed in the fortress.
    pub enum FortressBuildingType: u8 {
        Fortress = 0,
        LaborersQuarters = 1,
        WoodcuttersHut = 2,
        Quarry = 3,
        GemMine = 4,
        Academy = 5,
        ArcheryGuild = 6,
        Barracks = 7,
        MagesTower = 8,
        Treasury = 9,
        Smithy = 10,
        Wall = 11,
    }
}

wire_enum! {
    /// A unit that can be trained in the fortress.
    pub enum FortressUnitType: u8 {
        Soldier = 0,
        Magician = 1,
        Archer = 2,
    }
}

wire_enum! {
    /// A resource produced in the fortress.
    pub enum FortressResourceType: u8 {
        Wood = 0,
        Stone = 1,
        Experience = 2,
    }
}

// ---------------------------------------------------------------------------
// Underworld
// ---------------------------------------------------------------------------

wire_enum! {
    /// A resource produced in the underworld.
    pub enum UnderworldResourceType: u8 {
        Souls = 0,
        Silver = 1,
        ThirstForAdventure = 2,
    }
}

wire_enum! {
    /// A unit stationed in the underworld.
    pub enum UnderworldUnitType: u8 {
        Goblin = 0,
        Troll = 1,
        Keeper = 2,
    }
}

wire_enum! {
    /// A building in the underworld.
    pub enum UnderworldBuildingType: u8 {
        HeartOfDarkness = 0,
        Gate = 1,
        GoldPit = 2,
        SoulExtractor = 3,
        GoblinPit = 4,
        TortureChamber = 5,
        GladiatorTrainer = 6,
        TrollBlock = 7,
        Adventuromatic = 8,
        Keeper = 9,
    }
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

wire_enum! {
    /// How a spin of the wheel of fortune is paid for.
    pub enum FortunePaymentType: u8 {
        LuckyCoins = 0,
        Mushrooms = 1,
        FreeTurn = 2,
    }
}

wire_enum! {
    /// A mount the character can buy. Codes start at 1.
    pub enum MountType: u8 {
        Cow = 1,
        Horse = 2,
        Tiger = 3,
        Dragon = 4,
    }
}

wire_enum! {
    /// A character attribute. Codes start at 1.
    pub enum AttributeType: u8 {
        Strength = 1,
        Dexterity = 2,
        Intelligence = 3,
        Constitution = 4,
        Luck = 5,
    }
}

wire_enum! {
    /// Something a member can upgrade in the guild.
    pub enum GuildSkillType: u8 {
        Treasure = 0,
        Instructor = 1,
        Pet = 2,
    }
}

wire_enum! {
    /// The item places owned by the player.
    ///
    /// Sparse: the server reserves 3 and 4 for places the player doesn't
    /// own (shops), which is why `ExtendedInventory` is 5.
    pub enum PlayerItemPlaceType: u8 {
        Equipment = 1,
        MainInventory = 2,
        ExtendedInventory = 5,
    }
}

// ---------------------------------------------------------------------------
// Expeditions and the Hellevator
// ---------------------------------------------------------------------------

wire_enum! {
    /// What is spent to skip a waiting period.
    pub enum TimeSkipType: u8 {
        Mushroom = 1,
        Glass = 2,
    }
}

wire_enum! {
    /// A treat sold in the Hellevator shop. Codes start at 1.
    pub enum HellevatorTreatType: u8 {
        ChocolateChilliPepper = 1,
        PickledLoveNecklace = 2,
        LavaSausage = 3,
        SourSpiderCrab = 4,
        FrozenFireball = 5,
        DemonEggnog = 6,
        BrimstoneBrownie = 7,
        CinderCake = 8,
    }
}

// =========================================================================
// Tests
// =========================================================================
