/// All semantic actions in jobkan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusPrevColumn,
    FocusNextColumn,
    SelectPrevCard,
    SelectNextCard,
    JumpToColumn(usize),
    JumpToFirstCard,
    JumpToLastCard,

    // Drag gesture
    PickUpCard,
    DragHoverPrev,
    DragHoverNext,
    DragHoverColumn(usize),
    DropCard,
    CancelDrag,

    // Move-to menu
    OpenMovePicker,

    // Detail panel
    OpenDetail,
    ClosePanel,
    DetailScrollUp,
    DetailScrollDown,
    DetailNextCard,
    DetailPrevCard,

    // Search & filter
    StartFilter,
    ClearFilter,

    // Text input
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputConfirm,
    InputCancel,

    // App
    ReloadApplications,
    ShowHelp,
    Quit,

    // Minor mode entry
    EnterGotoMode,
    EnterSpaceMode,

    // No-op
    None,
}
