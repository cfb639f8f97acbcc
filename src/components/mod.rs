pub mod club_card;
pub mod fixture_list;
pub mod theme;
