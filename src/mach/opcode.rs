/// ## Virtual machine instruction set
///
/// Each instruction takes zero to three arguments. Arguments are read and
/// written through [`Arg`](super::Arg) references, so the same `add` works on
/// immediates, variables, or the instruction pointer.
///
/// For example: `add s0 1 s0` increments variable 0.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Data movement
    ValCopy,

    // *** Arithmetic
    Add,
    Sub,
    Mult,
    /// Integer division, truncating toward zero.
    Div,
    /// Integer remainder, sign follows the dividend.
    Mod,

    // *** Comparison; the result is always 1 or 0.
    TestLess,
    TestGtr,
    TestEqu,
    TestNequ,
    TestGte,
    TestLte,

    // *** Branch control
    Jump,
    JumpIf0,
    JumpIfN0,

    // *** Misc
    Nop,
    Random,
    OutInt,
    OutFloat,
    OutChar,

    // *** Stack manipulation
    Push,
    Pop,
    ArPush,
    ArPop,

    // *** Arrays
    ArGetIdx,
    ArSetIdx,
    ArGetSiz,
    ArSetSiz,
    ArCopy,

    // *** Memory
    Load,
    Store,
    MemCopy,

    DebugStatus,
}

impl Opcode {
    pub const ALL: [Opcode; 33] = [
        Opcode::ValCopy,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mult,
        Opcode::Div,
        Opcode::Mod,
        Opcode::TestLess,
        Opcode::TestGtr,
        Opcode::TestEqu,
        Opcode::TestNequ,
        Opcode::TestGte,
        Opcode::TestLte,
        Opcode::Jump,
        Opcode::JumpIf0,
        Opcode::JumpIfN0,
        Opcode::Nop,
        Opcode::Random,
        Opcode::OutInt,
        Opcode::OutFloat,
        Opcode::OutChar,
        Opcode::Push,
        Opcode::Pop,
        Opcode::ArPush,
        Opcode::ArPop,
        Opcode::ArGetIdx,
        Opcode::ArSetIdx,
        Opcode::ArGetSiz,
        Opcode::ArSetSiz,
        Opcode::ArCopy,
        Opcode::Load,
        Opcode::Store,
        Opcode::MemCopy,
        Opcode::DebugStatus,
    ];

    pub fn name(self) -> &'static str {
        use Opcode::*;
        match self {
            ValCopy => "val_copy",
            Add => "add",
            Sub => "sub",
            Mult => "mult",
            Div => "div",
            Mod => "mod",
            TestLess => "test_less",
            TestGtr => "test_gtr",
            TestEqu => "test_equ",
            TestNequ => "test_nequ",
            TestGte => "test_gte",
            TestLte => "test_lte",
            Jump => "jump",
            JumpIf0 => "jump_if_0",
            JumpIfN0 => "jump_if_n0",
            Nop => "nop",
            Random => "random",
            OutInt => "out_int",
            OutFloat => "out_float",
            OutChar => "out_char",
            Push => "push",
            Pop => "pop",
            ArPush => "ar_push",
            ArPop => "ar_pop",
            ArGetIdx => "ar_get_idx",
            ArSetIdx => "ar_set_idx",
            ArGetSiz => "ar_get_siz",
            ArSetSiz => "ar_set_siz",
            ArCopy => "ar_copy",
            Load => "load",
            Store => "store",
            MemCopy => "mem_copy",
            DebugStatus => "debug_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Opcode> {
        Opcode::ALL.iter().copied().find(|op| op.name() == name)
    }

    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            Nop | DebugStatus => 0,
            Jump | OutInt | OutFloat | OutChar | Push | Pop | ArPush | ArPop => 1,
            ValCopy | JumpIf0 | JumpIfN0 | Random | ArGetSiz | ArSetSiz | ArCopy | Load
            | Store | MemCopy => 2,
            Add | Sub | Mult | Div | Mod | TestLess | TestGtr | TestEqu | TestNequ | TestGte
            | TestLte | ArGetIdx | ArSetIdx => 3,
        }
    }

    /// Index of the argument this instruction writes a scalar into, if any.
    pub fn destination(self) -> Option<usize> {
        use Opcode::*;
        match self {
            Pop => Some(0),
            ValCopy | Random | ArGetSiz | Load => Some(1),
            Add | Sub | Mult | Div | Mod | TestLess | TestGtr | TestEqu | TestNequ | TestGte
            | TestLte | ArGetIdx => Some(2),
            _ => None,
        }
    }

    pub fn cost(self) -> u32 {
        use Opcode::*;
        match self {
            Nop | DebugStatus => 0,
            Load | Store | MemCopy => 100,
            _ => 1,
        }
    }

    pub fn description(self) -> &'static str {
        use Opcode::*;
        match self {
            ValCopy => "Duplicate the value of arg1 into arg2",
            Add => "Add the values of arg1 and arg2 and place the sum in arg3",
            Sub => "Subtract the values of arg2 from arg1 and place the difference in arg3",
            Mult => "Multiply the values of arg1 and arg2 and place the product in arg3",
            Div => "Divide the value of arg1 by arg2 and place the truncated ratio in arg3",
            Mod => "Divide the value of arg1 by arg2 and place the *remainder* in arg3",
            TestLess => "If (arg1 < arg2), arg3 is set to 1, else arg3 is set to 0",
            TestGtr => "If (arg1 > arg2), arg3 is set to 1, else arg3 is set to 0",
            TestEqu => "If (arg1 == arg2), arg3 is set to 1, else arg3 is set to 0",
            TestNequ => "If (arg1 != arg2), arg3 is set to 1, else arg3 is set to 0",
            TestGte => "If (arg1 >= arg2), arg3 is set to 1, else arg3 is set to 0",
            TestLte => "If (arg1 <= arg2), arg3 is set to 1, else arg3 is set to 0",
            Jump => "Jump IP to position designated by arg1",
            JumpIf0 => "If arg1 == 0, Jump IP to position designated by arg2",
            JumpIfN0 => "If arg1 != 0, Jump IP to position designated by arg2",
            Nop => "No-operation.",
            Random => "set arg2 to a random value x, where 0 <= x < arg1.",
            OutInt => "Print out arg1 as an integer",
            OutFloat => "Print out arg1 as a floating-point number",
            OutChar => "Print out arg1 as a character",
            Push => "Store arg1 in an internal control stack",
            Pop => "Retrieve arg1 from an internal control stack",
            ArPush => "Store array arg1 in an internal control stack",
            ArPop => "Retrieve array arg1 from an internal control stack",
            ArGetIdx => "In array arg1, find value @ index arg2, and put result in arg3",
            ArSetIdx => "In array arg1, set value @ index arg2 to value arg3",
            ArGetSiz => "Calculate size of array arg1 and put result in arg2",
            ArSetSiz => "Resize array arg1 to arg2",
            ArCopy => "Duplicate the value in array arg1 to array arg2",
            Load => "Copy from memory position arg1 into register arg2",
            Store => "Copy from register arg1 into memory position arg2",
            MemCopy => "Copy from memory position arg1 to memory position arg2",
            DebugStatus => "if in debug mode, print the status of all registers and memory",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
