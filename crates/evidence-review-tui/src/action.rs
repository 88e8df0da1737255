use evidence_review_core::FlagField;

/// User intents produced by the input layer and consumed by `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    NavigateBack,
    PrevRecord,
    NextRecord,
    ToggleFlag(FlagField),
    Save,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    /// Mouse press at (column, row).
    DragStart(u16, u16),
    DragMove(u16, u16),
    DragEnd,
    ToggleSidebar,
    ListUp,
    ListDown,
    ListSelect,
    CopyImageUrl,
    Reload,
    ToggleHelp,
    Tick,
    None,
}
